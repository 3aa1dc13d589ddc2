//! Fehlerdefinitionen für das Mapping-Modul

use thiserror::Error;

/// Fehlertypen für Mapping-Beschreibungen und Profile
#[derive(Debug, Error)]
pub enum MappingError {
    /// Das Ereignissymbol einer Textbeschreibung steht nicht in der Symboltabelle
    #[error("Unbekanntes Ereignissymbol '{token}' in '{spec}'")]
    UnknownSymbol { spec: String, token: String },

    /// Ein Parameter-Token ist keine gültige Zahl
    #[error("Ungültiger Parameter '{token}' in '{spec}'")]
    InvalidParameter { spec: String, token: String },

    /// Das Symbol passt nicht zum Control-Slot (z.B. Absolutachse auf Button)
    #[error("Symbol '{token}' ist für diesen Control-Slot nicht zulässig ('{spec}')")]
    UnsupportedTarget { spec: String, token: String },

    /// Widersprüchliche Profil-Flags
    #[error("trigger_as_button und trigger_as_zaxis schließen sich gegenseitig aus")]
    ConflictingFlags,
}
