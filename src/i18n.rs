//! English/Spanish UI strings.
//!
//! Lookups go through [`translate`], which never fails: an unknown key is
//! returned as-is so a missing entry is visible but harmless.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Es,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Es => "es",
        }
    }

    /// Match a POSIX-style locale such as `es_ES.UTF-8` or `es-MX`.
    pub fn from_locale(locale: &str) -> Option<Lang> {
        let primary = locale
            .split(['_', '-', '.', '@'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        primary.parse().ok()
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Lang::En),
            "es" => Ok(Lang::Es),
            other => Err(InputError::Language(other.to_string())),
        }
    }
}

fn lookup(key: &str, lang: Lang) -> Option<&'static str> {
    let text = match (key, lang) {
        ("lastUpdated", Lang::En) => "Last updated: ",
        ("lastUpdated", Lang::Es) => "Última actualización: ",
        ("noData", Lang::En) => "No updated data yet.",
        ("noData", Lang::Es) => "Aún no hay datos actualizados.",
        ("reposListed", Lang::En) => "Repositories listed: ",
        ("reposListed", Lang::Es) => "Repositorios listados: ",
        ("noResults", Lang::En) => "No results.",
        ("noResults", Lang::Es) => "No hay resultados.",
        ("noDescription", Lang::En) => "No description",
        ("noDescription", Lang::Es) => "Sin descripción",
        ("updated", Lang::En) => "Updated: ",
        ("updated", Lang::Es) => "Actualizado: ",
        ("pageOf", Lang::En) => "Page {current} of {total}",
        ("pageOf", Lang::Es) => "Página {current} de {total}",
        ("checking", Lang::En) => "🔄 Checking for updates...",
        ("checking", Lang::Es) => "🔄 Verificando actualizaciones...",
        ("lastCheck", Lang::En) => "✓ Last check: {time}",
        ("lastCheck", Lang::Es) => "✓ Última verificación: {time}",
        ("checkError", Lang::En) => "⚠️ Check error ({time})",
        ("checkError", Lang::Es) => "⚠️ Error al verificar ({time})",
        ("newRepos", Lang::En) => "✨ New repositories available! The list has been updated.",
        ("newRepos", Lang::Es) => "✨ ¡Nuevos repositorios disponibles! La lista ha sido actualizada.",
        ("unknown", Lang::En) => "Unknown",
        ("unknown", Lang::Es) => "Desconocido",
        ("search", Lang::En) => "Search: ",
        ("search", Lang::Es) => "Buscar: ",
        ("minStars", Lang::En) => "Minimum stars: ",
        ("minStars", Lang::Es) => "Estrellas mínimas: ",
        ("firstPage", Lang::En) => "« First",
        ("firstPage", Lang::Es) => "« Primera",
        ("prevPage", Lang::En) => "‹ Previous",
        ("prevPage", Lang::Es) => "‹ Anterior",
        ("nextPage", Lang::En) => "Next ›",
        ("nextPage", Lang::Es) => "Siguiente ›",
        ("lastPage", Lang::En) => "Last »",
        ("lastPage", Lang::Es) => "Última »",
        ("dismiss", Lang::En) => "[x to dismiss]",
        ("dismiss", Lang::Es) => "[x para cerrar]",
        ("paused", Lang::En) => "⏸ Auto-refresh paused",
        ("paused", Lang::Es) => "⏸ Actualización automática en pausa",
        _ => return None,
    };
    Some(text)
}

/// Look up `key` in `lang` and substitute `{name}` placeholders from `params`.
pub fn translate(key: &str, lang: Lang, params: &[(&str, &str)]) -> String {
    let mut text = match lookup(key, lang) {
        Some(text) => text.to_string(),
        None => return key.to_string(),
    };
    for (name, value) in params {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

/// Shorthand for a lookup without placeholders.
pub fn t(key: &str, lang: Lang) -> String {
    translate(key, lang, &[])
}
