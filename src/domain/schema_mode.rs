use std::{fmt, str::FromStr};

use super::ConfigError;

/// What to do with the `member` table when the application starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaMode {
    #[default]
    None,
    Validate,
    Update,
    Create,
    CreateDrop,
}

impl SchemaMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaMode::None => "none",
            SchemaMode::Validate => "validate",
            SchemaMode::Update => "update",
            SchemaMode::Create => "create",
            SchemaMode::CreateDrop => "create-drop",
        }
    }

    pub fn drops_on_exit(&self) -> bool {
        matches!(self, SchemaMode::CreateDrop)
    }
}

impl FromStr for SchemaMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(SchemaMode::None),
            "validate" => Ok(SchemaMode::Validate),
            "update" => Ok(SchemaMode::Update),
            "create" => Ok(SchemaMode::Create),
            "create-drop" | "create_drop" => Ok(SchemaMode::CreateDrop),
            _ => Err(ConfigError::InvalidSchemaMode(s.to_owned())),
        }
    }
}

impl fmt::Display for SchemaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[test]
fn test_valid_schema_modes() {
    let modes = [
        ("none", SchemaMode::None),
        ("validate", SchemaMode::Validate),
        ("update", SchemaMode::Update),
        ("create", SchemaMode::Create),
        ("CREATE", SchemaMode::Create),
        ("create-drop", SchemaMode::CreateDrop),
        ("create_drop", SchemaMode::CreateDrop),
    ];
    for (raw, expected) in modes.iter() {
        let parsed: SchemaMode = raw.parse().expect(raw);
        assert_eq!(&parsed, expected, "Unexpected mode for {raw}");
    }
}

#[test]
fn test_invalid_schema_mode() {
    let result = "create-everything".parse::<SchemaMode>();
    assert_eq!(
        result,
        Err(ConfigError::InvalidSchemaMode("create-everything".to_owned()))
    );
}

#[test]
fn test_display_round_trips() {
    for mode in [SchemaMode::Update, SchemaMode::CreateDrop] {
        assert_eq!(mode.to_string().parse::<SchemaMode>(), Ok(mode));
    }
}
