//! Run configuration and the lookups that must succeed before any work starts.
//!
//! Every lookup here is strict: it must match exactly one candidate. Zero
//! matches and several matches are both [`ConfigurationError`]s; there is no
//! tie-break.

use crate::error::ConfigurationError;
use crate::model::{Document, FamilySymbol, Session, View, ViewKind};

pub const DEFAULT_COMPANION_SUFFIX: &str = "_MEP";
pub const DEFAULT_FAMILY_NAME: &str = "Opening";
pub const GENERIC_MODEL_CATEGORY: &str = "GenericModel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoleConfig {
    /// Title suffix identifying the mechanical companion model.
    pub companion_suffix: String,
    /// Family name of the opening marker loaded into the host.
    pub family_name: String,
    pub family_category: String,
    pub width_parameter: String,
    pub height_parameter: String,
}

impl Default for HoleConfig {
    fn default() -> Self {
        Self {
            companion_suffix: DEFAULT_COMPANION_SUFFIX.to_string(),
            family_name: DEFAULT_FAMILY_NAME.to_string(),
            family_category: GENERIC_MODEL_CATEGORY.to_string(),
            width_parameter: "Width".to_string(),
            height_parameter: "Height".to_string(),
        }
    }
}

/// Resources located in the session for one run.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConfig<'a> {
    pub host: &'a Document,
    pub companion: &'a Document,
    pub symbol: &'a FamilySymbol,
    pub view: &'a View,
}

/// Locates the host, the companion model, the hole family symbol and the 3D view.
pub fn resolve_config<'a>(
    session: &'a Session,
    config: &HoleConfig,
) -> Result<ResolvedConfig<'a>, ConfigurationError> {
    let host = exactly_one(
        session.documents.iter().filter(|d| d.active),
        "active document",
        ConfigurationError::NoActiveDocument,
    )?;

    let companion = exactly_one(
        session
            .documents
            .iter()
            .filter(|d| d.title.ends_with(&config.companion_suffix)),
        "companion model",
        ConfigurationError::MissingCompanion {
            suffix: config.companion_suffix.clone(),
        },
    )?;

    let symbol = exactly_one(
        host.family_symbols.iter().filter(|s| {
            s.category == config.family_category && s.family_name == config.family_name
        }),
        "hole family symbol",
        ConfigurationError::MissingFamily {
            family: config.family_name.clone(),
        },
    )?;

    let view = exactly_one(
        host.views
            .iter()
            .filter(|v| v.kind == ViewKind::ThreeD && !v.is_template),
        "3D view",
        ConfigurationError::MissingView,
    )?;

    tracing::debug!(
        host = %host.title,
        companion = %companion.title,
        symbol = symbol.id,
        view = %view.name,
        "Resolved configuration"
    );

    Ok(ResolvedConfig {
        host,
        companion,
        symbol,
        view,
    })
}

fn exactly_one<T, I>(
    candidates: I,
    what: &'static str,
    missing: ConfigurationError,
) -> Result<T, ConfigurationError>
where
    I: IntoIterator<Item = T>,
{
    let mut candidates = candidates.into_iter();
    let first = candidates.next().ok_or(missing)?;
    let extra = candidates.count();
    if extra > 0 {
        return Err(ConfigurationError::Ambiguous {
            what,
            count: extra + 1,
        });
    }
    Ok(first)
}
