use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub fn all() -> &'static [Self] {
                &[$(Self::$variant),+]
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Keyword that opens a document title. The string doubles as the
// `tipos_documento.nome` the document is filed under.
str_enum!(DocumentClass {
    Portaria => "Portaria",
    Decreto => "Decreto",
    Lei => "Lei",
    InstrucaoNormativa => "Instrução Normativa",
    Resolucao => "Resolução",
    Manual => "Manual",
});

// Grouping key for aggregate counts.
str_enum!(Dimension {
    Type => "type",
    Organ => "organ",
    Year => "year",
});

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn document_class_round_trips_through_lookup_name() {
        for class in DocumentClass::all() {
            assert_eq!(DocumentClass::from_str(class.as_str()).unwrap(), *class);
        }
        assert_eq!(DocumentClass::InstrucaoNormativa.as_str(), "Instrução Normativa");
    }

    #[test]
    fn unknown_dimension_is_invalid_enum() {
        let err = Dimension::from_str("status").unwrap_err();
        assert!(
            matches!(err, DatabaseError::InvalidEnum { ref field, .. } if field == "Dimension")
        );
    }

    #[test]
    fn dimension_displays_as_str() {
        assert_eq!(Dimension::Year.to_string(), "year");
        assert_eq!(Dimension::all().len(), 3);
    }
}
