//! Curated normalization catalogs
//!
//! Ordered key → canonical value tables. Iteration order is significant: the
//! partial-match and keyword tiers take the first hit in table order.
//! Built-in tables can be extended from a JSON override file; an override
//! replaces the value of an existing key in place and appends new keys.

use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Ordered string → string table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut catalog = Self::default();
        for (key, value) in pairs {
            catalog.insert(*key, *value);
        }
        catalog
    }

    /// Insert a pair; an existing key keeps its position and takes the new value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another catalog (its values win)
    pub fn merge(&mut self, other: &Catalog) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of string values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Catalog, A::Error> {
                let mut catalog = Catalog::default();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    catalog.insert(key, value);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Every table the resolvers consult
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalogs {
    /// Verbatim degree strings with a fixed specialization
    pub special_cases: Catalog,
    /// Lowercase specialization → category
    pub specializations: Catalog,
    /// Lowercase keyword fragment → category
    pub specialization_keywords: Catalog,
    /// Lowercase institution → canonical name
    pub universities: Catalog,
    /// Lowercase keyword fragment → canonical name
    pub university_keywords: Catalog,
}

impl Catalogs {
    /// Built-in tables
    pub fn builtin() -> Self {
        Self {
            special_cases: Catalog::from_pairs(SPECIAL_CASES),
            specializations: Catalog::from_pairs(SPECIALIZATIONS),
            specialization_keywords: Catalog::from_pairs(SPECIALIZATION_KEYWORDS),
            universities: Catalog::from_pairs(UNIVERSITIES),
            university_keywords: Catalog::from_pairs(UNIVERSITY_KEYWORDS),
        }
    }

    /// Load from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let catalogs: Self = serde_json::from_str(json)?;
        Ok(catalogs)
    }

    /// Load from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Built-in tables extended by an override
    pub fn builtin_with(overrides: &Catalogs) -> Self {
        let mut catalogs = Self::builtin();
        catalogs.merge(overrides);
        catalogs
    }

    pub fn merge(&mut self, other: &Catalogs) {
        self.special_cases.merge(&other.special_cases);
        self.specializations.merge(&other.specializations);
        self.specialization_keywords.merge(&other.specialization_keywords);
        self.universities.merge(&other.universities);
        self.university_keywords.merge(&other.university_keywords);
    }
}

const SPECIAL_CASES: &[(&str, &str)] = &[
    ("PhD, ISyE", "Industrial and Systems Engineering"),
    ("Master's degree", "General"),
    ("Master of Science", "General Science"),
    ("PhD. in Physics", "Physics"),
    ("Ingeniero Mecánico", "Mechanical Engineering"),
];

const SPECIALIZATIONS: &[(&str, &str)] = &[
    // Engineering and technology
    ("mechanics", "Mechanical Engineering"),
    ("mechanical engineering", "Mechanical Engineering"),
    ("ingeniería mecánica", "Mechanical Engineering"),
    ("mecánica", "Mechanical Engineering"),
    ("design mechanics", "Mechanical Engineering"),
    ("mechanics, with a specialization in design mechanics", "Mechanical Engineering"),
    ("civil engineering", "Civil Engineering"),
    ("ingeniería civil", "Civil Engineering"),
    ("civil", "Civil Engineering"),
    ("electrical engineering", "Electrical Engineering"),
    ("ingeniería electrónica", "Electrical Engineering"),
    ("electronic engineering", "Electrical Engineering"),
    ("electrónica", "Electrical Engineering"),
    ("ciencias con mención en ingeniería electrónica", "Electrical Engineering"),
    ("biomedical engineering", "Biomedical Engineering"),
    ("ingeniería biomédica", "Biomedical Engineering"),
    ("biomédica", "Biomedical Engineering"),
    ("computer science", "Computer Science"),
    ("ciencias de la computación", "Computer Science"),
    ("ciencia de la computación", "Computer Science"),
    ("informática", "Computer Science"),
    ("computer engineering", "Computer Science"),
    ("informática y robótica", "Computer Science"),
    ("matemática aplicada e informática", "Computer Science"),
    ("industrial engineering", "Industrial Engineering"),
    ("industrial and systems engineering", "Industrial Engineering"),
    ("ingeniería industrial", "Industrial Engineering"),
    ("isye", "Industrial Engineering"),
    ("systems engineering", "Industrial Engineering"),
    ("chemical engineering", "Chemical Engineering"),
    ("ingeniería química", "Chemical Engineering"),
    ("energy engineering", "Energy Engineering"),
    ("ingeniería de la energía", "Energy Engineering"),
    ("energía", "Energy Engineering"),
    ("tecnología, diversificación, calidad y ahorro energético", "Energy Engineering"),
    ("ingeniería térmica avanzada y optimización energética", "Energy Engineering"),
    ("robotics", "Robotics and Mechatronics"),
    ("mechatronics", "Robotics and Mechatronics"),
    ("mecatrónica", "Robotics and Mechatronics"),
    ("ciencias mecánicas y robótica", "Robotics and Mechatronics"),
    // Basic sciences
    ("physics", "Physics"),
    ("física", "Physics"),
    ("physical sciences", "Physics"),
    ("mathematics", "Mathematics"),
    ("matemáticas", "Mathematics"),
    ("matemáticas aplicadas", "Applied Mathematics"),
    ("applied mathematics", "Applied Mathematics"),
    ("mathematical sciences", "Mathematics"),
    ("chemistry", "Chemistry"),
    ("química", "Chemistry"),
    ("ciencias naturales", "Natural Sciences"),
    // Management and business
    ("management science", "Management and Business"),
    ("business administration", "Management and Business"),
    ("administration", "Management and Business"),
    ("administración", "Management and Business"),
    ("ciencias de la administración", "Management and Business"),
    ("management", "Management and Business"),
    ("business", "Management and Business"),
    ("engineering management", "Management and Business"),
    // Humanities and arts
    ("art history", "Humanities and Arts"),
    ("historia del arte", "Humanities and Arts"),
    ("literature", "Humanities and Arts"),
    ("literatura", "Humanities and Arts"),
    ("lengua y literaturas hispánicas", "Humanities and Arts"),
    ("humanities", "Humanities and Arts"),
    // Social sciences
    ("sociology", "Social Sciences"),
    ("sociología", "Social Sciences"),
    ("gender studies", "Social Sciences"),
    ("estudios interdisciplinarios de género", "Social Sciences"),
    ("estudios de género", "Social Sciences"),
    // Education
    ("education", "Education"),
    ("educación", "Education"),
    ("ciencias de la educación", "Education"),
    ("pedagogía", "Education"),
    // Other technical fields
    ("naval architecture", "Naval and Marine Engineering"),
    ("arquitectura naval", "Naval and Marine Engineering"),
    ("marine engineering", "Naval and Marine Engineering"),
    ("ingeniería marina", "Naval and Marine Engineering"),
    ("arquitectura naval e ingeniería marina", "Naval and Marine Engineering"),
    ("thermal engineering", "Energy and Thermal Systems"),
    ("ingeniería térmica", "Energy and Thermal Systems"),
    ("optimización energética", "Energy and Thermal Systems"),
    ("fonoaudiología", "Health Sciences"),
    ("speech therapy", "Health Sciences"),
    ("general", "General"),
    ("general science", "General Science"),
];

const SPECIALIZATION_KEYWORDS: &[(&str, &str)] = &[
    ("mecánic", "Mechanical Engineering"),
    ("mechanic", "Mechanical Engineering"),
    ("civil", "Civil Engineering"),
    ("electr", "Electrical Engineering"),
    ("biomédic", "Biomedical Engineering"),
    ("biomedic", "Biomedical Engineering"),
    ("comput", "Computer Science"),
    ("informát", "Computer Science"),
    ("industri", "Industrial Engineering"),
    ("físic", "Physics"),
    ("physic", "Physics"),
    ("matemát", "Mathematics"),
    ("mathemat", "Mathematics"),
    ("químic", "Chemical Engineering"),
    ("chemic", "Chemical Engineering"),
    ("energ", "Energy Engineering"),
    ("robot", "Robotics and Mechatronics"),
    ("mecatron", "Robotics and Mechatronics"),
    ("administr", "Management and Business"),
    ("management", "Management and Business"),
    ("histori", "Humanities and Arts"),
    ("literatur", "Humanities and Arts"),
    ("sociolog", "Social Sciences"),
    ("género", "Social Sciences"),
    ("gender", "Social Sciences"),
    ("educac", "Education"),
    ("education", "Education"),
    ("naval", "Naval and Marine Engineering"),
    ("marino", "Naval and Marine Engineering"),
    ("marine", "Naval and Marine Engineering"),
    ("térmico", "Energy and Thermal Systems"),
    ("thermal", "Energy and Thermal Systems"),
    ("fonoaudi", "Health Sciences"),
];

const UNIVERSITIES: &[(&str, &str)] = &[
    // Peru
    ("pontificia universidad católica del perú", "PUCP"),
    ("pucp", "PUCP"),
    ("universidad nacional de ingeniería", "UNI Peru"),
    ("national university of engineering", "UNI Peru"),
    ("universidad de ingeniería y tecnología - utec, lima, perú", "UTEC"),
    ("utec", "UTEC"),
    ("universidad nacional de educación", "UNE"),
    ("universidad nacional de san agustín", "UNSA"),
    ("esan graduate school of business", "ESAN"),
    // Mexico
    ("universidad nacional autónoma de méxico", "UNAM"),
    ("unam", "UNAM"),
    ("tec de monterrey", "Tecnológico de Monterrey"),
    ("tecnológico de monterrey", "Tecnológico de Monterrey"),
    // United States and Canada
    ("georgia tech", "Georgia Institute of Technology"),
    ("georgia institute of technology", "Georgia Institute of Technology"),
    ("university of california, berkeley", "UC Berkeley"),
    ("uc berkeley", "UC Berkeley"),
    ("universidad de california, berkeley", "UC Berkeley"),
    ("florida international university", "Florida International University"),
    ("northeastern university", "Northeastern University"),
    ("university of alberta", "University of Alberta"),
    ("university of oxford", "University of Oxford"),
    ("simon fraser university", "Simon Fraser University"),
    ("universidad texas a&m (eeuu)", "Texas A&M University"),
    ("texas a&m university", "Texas A&M University"),
    // Europe
    ("université laval", "Université Laval"),
    ("universidad técnica de lisboa", "Technical University of Lisbon"),
    ("universitat de valència", "University of Valencia"),
    ("universidad de valencia", "University of Valencia"),
    ("universidad de toulouse iii", "University of Toulouse III"),
    ("universidad de zaragoza", "University of Zaragoza"),
    ("eindhoven university of technology", "Eindhoven University of Technology"),
    ("sorbonne université", "Sorbonne University"),
    ("universidad de oviedo", "University of Oviedo"),
    ("albert-ludwigs-universität freiburg im breisgau", "University of Freiburg"),
    // Brazil
    ("universidad de sao paulo (usp)", "University of São Paulo"),
    ("universidade de são paulo", "University of São Paulo"),
    ("usp", "University of São Paulo"),
    ("universidade federal de minas gerais", "Federal University of Minas Gerais"),
    ("ufmg", "Federal University of Minas Gerais"),
    // Elsewhere
    ("universidad de puerto rico-mayaguez", "University of Puerto Rico at Mayagüez"),
    ("universidad nacional de singapur", "National University of Singapore"),
    ("nus", "National University of Singapore"),
    ("instituto de matemática pura e aplicada (impa)", "IMPA Brazil"),
    ("impa", "IMPA Brazil"),
    ("instituto de física y tecnología de moscú, rusia", "Moscow Institute of Physics and Technology"),
];

const UNIVERSITY_KEYWORDS: &[(&str, &str)] = &[
    ("pucp", "PUCP"),
    ("católica del perú", "PUCP"),
    ("pontificia católica", "PUCP"),
    ("uni peru", "UNI Peru"),
    ("ingeniería peru", "UNI Peru"),
    ("utec", "UTEC"),
    ("unam", "UNAM"),
    ("autónoma méxico", "UNAM"),
    ("monterrey", "Tecnológico de Monterrey"),
    ("georgia tech", "Georgia Institute of Technology"),
    ("berkeley", "UC Berkeley"),
    ("california berkeley", "UC Berkeley"),
    ("oxford", "University of Oxford"),
    ("laval", "Université Laval"),
    ("toulouse", "University of Toulouse III"),
    ("valencia", "University of Valencia"),
    ("zaragoza", "University of Zaragoza"),
    ("eindhoven", "Eindhoven University of Technology"),
    ("sorbonne", "Sorbonne University"),
    ("oviedo", "University of Oviedo"),
    ("freiburg", "University of Freiburg"),
    ("são paulo", "University of São Paulo"),
    ("sao paulo", "University of São Paulo"),
    ("minas gerais", "Federal University of Minas Gerais"),
    ("puerto rico", "University of Puerto Rico at Mayagüez"),
    ("singapur", "National University of Singapore"),
    ("singapore", "National University of Singapore"),
    ("northeastern", "Northeastern University"),
    ("alberta", "University of Alberta"),
    ("texas a&m", "Texas A&M University"),
    ("florida international", "Florida International University"),
    ("simon fraser", "Simon Fraser University"),
    ("impa", "IMPA Brazil"),
    ("moscú", "Moscow Institute of Physics and Technology"),
    ("moscow", "Moscow Institute of Physics and Technology"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_position() {
        let mut catalog = Catalog::from_pairs(&[("a", "1"), ("b", "2")]);
        catalog.insert("a", "3");
        catalog.insert("c", "4");
        let pairs: Vec<_> = catalog.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2"), ("c", "4")]);
        assert_eq!(catalog.get("a"), Some("3"));
        assert_eq!(catalog.get("z"), None);
    }

    #[test]
    fn test_builtin_tables_loaded() {
        let catalogs = Catalogs::builtin();
        assert_eq!(catalogs.universities.get("pucp"), Some("PUCP"));
        assert_eq!(catalogs.specializations.get("física"), Some("Physics"));
        assert_eq!(catalogs.specialization_keywords.iter().next(), Some(("mecánic", "Mechanical Engineering")));
        assert_eq!(catalogs.special_cases.get("PhD, ISyE"), Some("Industrial and Systems Engineering"));
    }

    #[test]
    fn test_override_from_json_preserves_order() {
        let json = r#"{
            "universities": {"utec": "Universidad de Ingeniería y Tecnología", "mit": "MIT"},
            "specialization_keywords": {"zz": "Z", "aa": "A"}
        }"#;
        let overrides = Catalogs::from_json(json).expect("parse failed");
        assert_eq!(
            overrides.specialization_keywords.iter().collect::<Vec<_>>(),
            vec![("zz", "Z"), ("aa", "A")]
        );

        let merged = Catalogs::builtin_with(&overrides);
        assert_eq!(merged.universities.get("utec"), Some("Universidad de Ingeniería y Tecnología"));
        assert_eq!(merged.universities.get("mit"), Some("MIT"));
        assert_eq!(merged.universities.len(), Catalogs::builtin().universities.len() + 1);
        // untouched tables keep the built-in values
        assert_eq!(merged.specializations, Catalogs::builtin().specializations);
    }

    #[test]
    fn test_catalog_serialize_roundtrip() {
        let catalog = Catalog::from_pairs(&[("b", "2"), ("a", "1")]);
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
        let restored: Catalog = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, catalog);
    }

    #[test]
    fn test_invalid_override_is_error() {
        assert!(Catalogs::from_json(r#"{"universities": {"x": 1}}"#).is_err());
    }
}
