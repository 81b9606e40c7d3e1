// SPDX-License-Identifier: MPL-2.0
use crate::config::{defaults::DEFAULT_LOCALE, Config};
use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl std::fmt::Debug for I18n {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("I18n")
            .field("available_locales", &self.available_locales)
            .field("current_locale", &self.current_locale)
            .finish_non_exhaustive()
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, &Config::default())
    }
}

impl I18n {
    pub fn new(cli_lang: Option<String>, config: &Config) -> Self {
        let (bundles, available_locales) = load_bundles();
        let current_locale = resolve_locale(cli_lang, config, &available_locales)
            .unwrap_or_else(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    /// Builds an instance pinned to `locale`, ignoring config and OS settings.
    ///
    /// Unknown locales fall back to the default one.
    pub fn with_locale(locale: LanguageIdentifier) -> Self {
        let mut i18n = Self::new(None, &Config::default());
        i18n.current_locale = default_locale();
        i18n.set_locale(locale);
        i18n
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.try_tr(key)
            .unwrap_or_else(|| format!("MISSING: {}", key))
    }

    /// Like [`I18n::tr`], but `None` when the key has no usable translation.
    pub fn try_tr(&self, key: &str) -> Option<String> {
        let bundle = self.bundles.get(&self.current_locale)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, None, &mut errors);
        errors.is_empty().then(|| value.to_string())
    }
}

fn default_locale() -> LanguageIdentifier {
    DEFAULT_LOCALE
        .parse()
        .unwrap_or_else(|_| LanguageIdentifier::default())
}

fn load_bundles() -> (
    HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    Vec<LanguageIdentifier>,
) {
    let mut bundles = HashMap::new();
    let mut available_locales = Vec::new();

    for file in Asset::iter() {
        let filename = file.as_ref();
        let Some(locale_str) = filename.strip_suffix(".ftl") else {
            continue;
        };
        let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
            continue;
        };
        let Some(content) = Asset::get(filename) else {
            continue;
        };

        let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
        let resource = match FluentResource::try_new(source) {
            Ok(resource) => resource,
            Err((_, errors)) => {
                tracing::warn!(file = filename, ?errors, "skipping unparsable translation file");
                continue;
            }
        };
        let mut bundle = FluentBundle::new(vec![locale.clone()]);
        // Plain-text cells and titles; no bidi isolation marks around placeables.
        bundle.set_use_isolating(false);
        if let Err(errors) = bundle.add_resource(resource) {
            tracing::warn!(file = filename, ?errors, "translation file has conflicting messages");
            continue;
        }
        bundles.insert(locale.clone(), bundle);
        available_locales.push(locale);
    }

    (bundles, available_locales)
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Check CLI args
    if let Some(lang_str) = cli_lang {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 2. Check config file
    if let Some(lang_str) = &config.language {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 3. Check OS locale
    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if available.contains(&os_lang) {
                return Some(os_lang);
            }
        }
    }

    None
}
