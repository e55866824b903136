//! Internationalization (i18n) module: supported languages and translation
//! loading.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages
//! - `language`: Validated `Language` type; the only way to name a language
//! - `table`: Flattened translation tables built from nested JSON files
//! - `source`: Where translation files come from (HTTP, directory, memory)
//! - `provider`: The `TranslationProvider` contract and its caching service
//!
//! # Example
//!
//! ```rust,ignore
//! use locale_router::i18n::{DirTranslationSource, Language, TranslationService};
//!
//! let provider = TranslationService::new(DirTranslationSource::new("assets/i18n"));
//! let table = provider.get_translation(Language::from_code("en")?).await?;
//! ```

mod language;
mod provider;
mod registry;
mod source;
mod table;

pub use language::Language;
pub use provider::{LangChangeEvent, TranslationProvider, TranslationService};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use source::{
    DirTranslationSource, HttpTranslationSource, StaticTranslationSource, TranslationSource,
};
pub use table::TranslationTable;
