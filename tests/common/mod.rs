/*!
 * Common test utilities for the mdtranslate test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

use mdtranslate::providers::mock::MockProvider;
use mdtranslate::translation::TranslationAdapter;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample Quarto/Markdown chapter exercising every fragment kind
pub fn sample_chapter() -> &'static str {
    r#"---
title: "Random experiments"
author: Jane Doe
---

# Random experiments

Flip a coin and note the result[^coin].
See [the appendix](/appendix.html) for details, and the diagram below.

![A fair coin](/images/coin.png)

Run `flip()` to simulate one toss.

```r
flip <- function() sample(c("H", "T"), 1)
```

::: {.callout-note}
The code above is *not* translated.

```r
flip()
```
:::

This paragraph has **bold text** and *italic text* in it.

[^coin]: A coin is fair when both sides are equally likely.
"#
}

/// Adapter around an identity mock backend, with pacing disabled for tests
pub fn identity_adapter() -> TranslationAdapter {
    adapter_for(MockProvider::identity())
}

/// Adapter around an uppercasing mock backend
pub fn uppercase_adapter() -> TranslationAdapter {
    adapter_for(MockProvider::uppercase())
}

/// Adapter around a backend that fails on every call
pub fn failing_adapter() -> TranslationAdapter {
    adapter_for(MockProvider::failing())
}

/// Wrap a specific mock provider (clone it first to keep its call log)
pub fn adapter_for(provider: MockProvider) -> TranslationAdapter {
    TranslationAdapter::new(Box::new(provider), "es", Duration::ZERO)
}
