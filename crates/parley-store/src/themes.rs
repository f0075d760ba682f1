//! Custom themes, stored as one JSON list under a single key.

use tracing::{info, warn};

use crate::database::Database;
use crate::error::Result;
use crate::kv::Table;
use crate::models::CustomTheme;

const THEMES_KEY: &str = "custom_themes";

/// Decode the stored list. Anything unreadable counts as no themes.
fn decode_themes(raw: Option<&str>) -> Vec<CustomTheme> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(raw) {
        Ok(themes) => themes,
        Err(e) => {
            warn!(error = %e, "Stored theme list is malformed, treating as empty");
            Vec::new()
        }
    }
}

impl Database {
    /// All custom themes in stored order.
    pub fn list_themes(&self) -> Result<Vec<CustomTheme>> {
        let raw = self.kv_get(Table::Themes, THEMES_KEY)?;
        Ok(decode_themes(raw.as_deref()))
    }

    pub fn get_theme(&self, name: &str) -> Result<Option<CustomTheme>> {
        Ok(self.list_themes()?.into_iter().find(|t| t.name == name))
    }

    /// Save `theme`, replacing any theme with the same name.
    ///
    /// The old entry is removed and the new one appended, so a replaced
    /// theme moves to the end of the list.
    pub fn save_theme(&self, theme: &CustomTheme) -> Result<()> {
        theme.validate()?;
        let replaced = self.kv_edit(Table::Themes, THEMES_KEY, |raw| {
            let mut themes = decode_themes(raw.as_deref());
            let before = themes.len();
            themes.retain(|t| t.name != theme.name);
            let replaced = themes.len() != before;
            themes.push(theme.clone());
            Ok((Some(serde_json::to_string(&themes)?), replaced))
        })?;

        info!(name = %theme.name, replaced, "Custom theme saved");
        Ok(())
    }

    /// Remove the theme called `name`. Unknown names leave the list as is.
    pub fn delete_theme(&self, name: &str) -> Result<bool> {
        self.kv_edit(Table::Themes, THEMES_KEY, |raw| {
            let mut themes = decode_themes(raw.as_deref());
            let before = themes.len();
            themes.retain(|t| t.name != name);
            if themes.len() == before {
                return Ok((None, false));
            }
            Ok((Some(serde_json::to_string(&themes)?), true))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn theme(name: &str, primary: &str) -> CustomTheme {
        CustomTheme {
            name: name.into(),
            primary_color: primary.into(),
            secondary_color: "#03DAC6".into(),
            background_color: "#121212".into(),
            surface_color: "#1E1E1E".into(),
            text_color: "#FFFFFF".into(),
            accent_color: "#BB86FC".into(),
            is_dark: true,
        }
    }

    #[test]
    fn save_replaces_same_name() {
        let db = Database::open_in_memory().unwrap();
        db.save_theme(&theme("Ocean", "#0077BE")).unwrap();
        db.save_theme(&theme("Forest", "#228B22")).unwrap();
        db.save_theme(&theme("Ocean", "#005F99")).unwrap();

        let themes = db.list_themes().unwrap();
        let oceans: Vec<_> = themes.iter().filter(|t| t.name == "Ocean").collect();
        assert_eq!(oceans.len(), 1);
        assert_eq!(oceans[0].primary_color, "#005F99");

        // Replaced entries move to the end.
        let names: Vec<_> = themes.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Forest", "Ocean"]);
    }

    #[test]
    fn delete_unknown_is_noop() {
        let db = Database::open_in_memory().unwrap();
        db.save_theme(&theme("Ocean", "#0077BE")).unwrap();
        let before = db.list_themes().unwrap();

        assert!(!db.delete_theme("Nope").unwrap());
        assert_eq!(db.list_themes().unwrap(), before);

        assert!(db.delete_theme("Ocean").unwrap());
        assert!(db.list_themes().unwrap().is_empty());
        assert!(db.get_theme("Ocean").unwrap().is_none());
    }

    #[test]
    fn malformed_json_reads_empty() {
        let db = Database::open_in_memory().unwrap();
        db.kv_put(Table::Themes, THEMES_KEY, "{not json").unwrap();
        assert!(db.list_themes().unwrap().is_empty());

        // Saving over a corrupt list starts a fresh one.
        db.save_theme(&theme("Ocean", "#0077BE")).unwrap();
        assert_eq!(db.list_themes().unwrap().len(), 1);
    }

    #[test]
    fn invalid_theme_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        let err = db.save_theme(&theme("Bad", "blue")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidTheme(_)));
        assert!(db.list_themes().unwrap().is_empty());
    }

    #[test]
    fn themes_do_not_touch_settings() {
        let db = Database::open_in_memory().unwrap();
        db.save_theme(&theme("Ocean", "#0077BE")).unwrap();
        assert_eq!(db.kv_get(Table::Settings, THEMES_KEY).unwrap(), None);
    }
}
