/*!
 * Translation of placeholder-substituted document text.
 *
 * This module is organized in three parts:
 * - `adapter`: failure containment and pacing around the opaque backend
 * - `line`: line classification and inline-emphasis-aware translation
 * - `pipeline`: glue that runs extraction, line translation and restoration
 */

pub mod adapter;
pub mod line;
pub mod pipeline;

pub use adapter::TranslationAdapter;
pub use line::{LineKind, classify_line, normalize_emphasis_spacing, translate_lines};
pub use pipeline::translate_document;
