//! Field type definitions and parser for CRUD scaffolding
//!
//! Fields are given as one comma-separated string, each segment of the form
//! `name:type` optionally followed by `|` and `&`-separated validation rules.
//!
//! # Supported Field Types
//!
//! | type       | form widget                      |
//! |------------|----------------------------------|
//! | `string`   | `<input type="text">`            |
//! | `text`     | `<textarea rows="3">`            |
//! | `integer`  | `<input type="number">`          |
//! | `boolean`  | `<input type="checkbox">`        |
//! | `date`     | `<input type="date">`            |
//! | `datetime` | `<input type="datetime-local">`  |
//! | `time`     | `<input type="time">`            |
//! | `email`    | `<input type="email">`           |
//! | `password` | `<input type="password">`        |
//! | `enum`     | `<select>` with a placeholder    |
//! | `file`     | styled file picker               |
//! | `wysiwyg`  | rich-text editor                 |
//!
//! Any other type is kept verbatim as [`FieldType::Custom`] and becomes the
//! literal `type` attribute of a single-line input, unless parsing runs
//! with [`TypePolicy::Strict`].
//!
//! # Examples
//!
//! ```text
//! title:string|required&max:255  → string, ["required", "max:255"]
//! body:text                      → text, []
//! published:boolean              → boolean, []
//! ```

use crate::error::{Result, ScaffoldError};
use indexmap::IndexMap;
use std::fmt;

/// Field type enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Short string
    String,
    /// Multi-line text
    Text,
    /// Integer
    Integer,
    /// Boolean flag
    Boolean,
    /// Date (no time)
    Date,
    /// Date and time
    DateTime,
    /// Time of day
    Time,
    /// Email address
    Email,
    /// Password
    Password,
    /// Enumeration, options filled in by hand
    Enum,
    /// File upload
    File,
    /// Rich text
    Wysiwyg,
    /// Unrecognised type, passed through as the input type
    Custom(String),
}

/// How to treat type names outside the known set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypePolicy {
    /// Keep them as [`FieldType::Custom`]
    #[default]
    Permissive,
    /// Reject them with [`ScaffoldError::UnknownFieldType`]
    Strict,
}

impl FieldType {
    /// Resolve a type keyword
    ///
    /// Keywords are matched exactly; anything else, including a keyword in
    /// a different case, becomes [`FieldType::Custom`] holding the string as
    /// written.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "string" => Self::String,
            "text" => Self::Text,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "time" => Self::Time,
            "email" => Self::Email,
            "password" => Self::Password,
            "enum" => Self::Enum,
            "file" => Self::File,
            "wysiwyg" => Self::Wysiwyg,
            _ => Self::Custom(keyword.to_string()),
        }
    }

    /// HTML widget kind for this type
    ///
    /// For single-line inputs this is the value of the `type` attribute.
    #[must_use]
    pub fn widget_kind(&self) -> &str {
        match self {
            Self::String => "text",
            Self::Text => "textarea",
            Self::Integer => "number",
            Self::Boolean => "checkbox",
            Self::Date => "date",
            Self::DateTime => "datetime-local",
            Self::Time => "time",
            Self::Email => "email",
            Self::Password => "password",
            Self::Enum => "select",
            Self::File => "file",
            Self::Wysiwyg => "wysiwyg",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Whether this is one of the known types
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Time => "time",
            Self::Email => "email",
            Self::Password => "password",
            Self::Enum => "enum",
            Self::File => "file",
            Self::Wysiwyg => "wysiwyg",
            Self::Custom(name) => name.as_str(),
        };
        f.write_str(keyword)
    }
}

/// One parsed field: name, type and validation rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name (e.g. "title", "`published_at`")
    pub name: String,
    /// Field type
    pub field_type: FieldType,
    /// Validation rule tokens in the order given (e.g. `required`, `max:255`)
    pub validations: Vec<String>,
}

impl FieldSpec {
    /// Parse a single field segment
    ///
    /// Format: `name:type[|rule[&rule]*]`. The name ends at the first `:`,
    /// the type at the first `|`, so rules may themselves contain colons.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen_lib::scaffold::{FieldSpec, FieldType};
    /// let field = FieldSpec::parse("title:string|required&max:255").unwrap();
    /// assert_eq!(field.name, "title");
    /// assert_eq!(field.field_type, FieldType::String);
    /// assert_eq!(field.validations, vec!["required", "max:255"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MalformedFieldSpec`] if the segment has no
    /// `:` separator, or if the name or type is empty.
    pub fn parse(segment: &str) -> Result<Self> {
        let segment = segment.trim();

        let Some((name, rest)) = segment.split_once(':') else {
            return Err(ScaffoldError::malformed(segment, "missing ':' type separator"));
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(ScaffoldError::malformed(segment, "field name is empty"));
        }

        let (type_str, validations) = match rest.split_once('|') {
            Some((type_str, rules)) => (type_str, Self::split_rules(rules)),
            None => (rest, Vec::new()),
        };

        let type_str = type_str.trim();
        if type_str.is_empty() {
            return Err(ScaffoldError::malformed(segment, "field type is empty"));
        }

        Ok(Self {
            name: name.to_string(),
            field_type: FieldType::from_keyword(type_str),
            validations,
        })
    }

    fn split_rules(rules: &str) -> Vec<String> {
        rules
            .split('&')
            .map(str::trim)
            .filter(|rule| !rule.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Whether `required` is one of the validation rules
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.validations.iter().any(|rule| rule == "required")
    }

    /// Validation rules joined the way the framework expects (`a|b`)
    #[must_use]
    pub fn rule_string(&self) -> String {
        self.validations.join("|")
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.field_type)?;
        if !self.validations.is_empty() {
            write!(f, "|{}", self.validations.join("&"))?;
        }
        Ok(())
    }
}

/// Fields of one resource, keyed by name in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCollection {
    fields: IndexMap<String, FieldSpec>,
}

impl FieldCollection {
    /// Parse a comma-separated field specification
    ///
    /// An empty (or all-whitespace) input yields an empty collection. A name
    /// given twice keeps its first position and takes the later definition.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen_lib::scaffold::FieldCollection;
    /// let fields = FieldCollection::parse("b:string,a:string").unwrap();
    /// assert_eq!(fields.names().collect::<Vec<_>>(), vec!["b", "a"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MalformedFieldSpec`] for the first segment
    /// that cannot be parsed.
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, TypePolicy::Permissive)
    }

    /// Parse with an explicit policy for unknown types
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MalformedFieldSpec`] for an unparseable
    /// segment, and [`ScaffoldError::UnknownFieldType`] for an unknown type
    /// under [`TypePolicy::Strict`].
    pub fn parse_with(input: &str, policy: TypePolicy) -> Result<Self> {
        let mut fields = IndexMap::new();

        if input.trim().is_empty() {
            return Ok(Self { fields });
        }

        for segment in input.split(',') {
            let field = FieldSpec::parse(segment)?;

            if policy == TypePolicy::Strict && !field.field_type.is_known() {
                return Err(ScaffoldError::UnknownFieldType {
                    field: field.name,
                    type_name: field.field_type.to_string(),
                });
            }

            // IndexMap::insert keeps the slot of an existing key
            fields.insert(field.name.clone(), field);
        }

        Ok(Self { fields })
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    /// Fields in display order
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.values()
    }

    /// Field names in display order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a FieldCollection {
    type Item = &'a FieldSpec;
    type IntoIter = indexmap::map::Values<'a, String, FieldSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_simple_field() {
        let field = FieldSpec::parse("title:string").unwrap();
        assert_eq!(field.name, "title");
        assert_eq!(field.field_type, FieldType::String);
        assert!(field.validations.is_empty());
        assert!(!field.is_required());
    }

    #[test]
    fn test_parse_validations_in_order() {
        let field = FieldSpec::parse("slug:string|required&unique:posts").unwrap();
        assert_eq!(field.validations, vec!["required", "unique:posts"]);
        assert!(field.is_required());
        assert_eq!(field.rule_string(), "required|unique:posts");
    }

    #[test]
    fn test_parse_drops_empty_rules() {
        let field = FieldSpec::parse("title:string|").unwrap();
        assert!(field.validations.is_empty());

        let field = FieldSpec::parse("title:string|required&&max:10").unwrap();
        assert_eq!(field.validations, vec!["required", "max:10"]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let fields = FieldCollection::parse(" title : string | required , body:text ").unwrap();
        let title = fields.get("title").unwrap();
        assert_eq!(title.field_type, FieldType::String);
        assert_eq!(title.validations, vec!["required"]);
        assert!(fields.get("body").is_some());
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = FieldSpec::parse("title-string").unwrap_err();
        assert!(matches!(err, ScaffoldError::MalformedFieldSpec { .. }));
    }

    #[test]
    fn test_parse_empty_name_or_type() {
        assert!(matches!(
            FieldSpec::parse(":string").unwrap_err(),
            ScaffoldError::MalformedFieldSpec { .. }
        ));
        assert!(matches!(
            FieldSpec::parse("title:").unwrap_err(),
            ScaffoldError::MalformedFieldSpec { .. }
        ));
        assert!(matches!(
            FieldSpec::parse("title:|required").unwrap_err(),
            ScaffoldError::MalformedFieldSpec { .. }
        ));
    }

    #[test]
    fn test_parse_all_known_types() {
        let cases = [
            ("string", FieldType::String, "text"),
            ("text", FieldType::Text, "textarea"),
            ("integer", FieldType::Integer, "number"),
            ("boolean", FieldType::Boolean, "checkbox"),
            ("date", FieldType::Date, "date"),
            ("datetime", FieldType::DateTime, "datetime-local"),
            ("time", FieldType::Time, "time"),
            ("email", FieldType::Email, "email"),
            ("password", FieldType::Password, "password"),
            ("enum", FieldType::Enum, "select"),
            ("file", FieldType::File, "file"),
            ("wysiwyg", FieldType::Wysiwyg, "wysiwyg"),
        ];

        for (keyword, expected, widget) in cases {
            let field_type = FieldType::from_keyword(keyword);
            assert_eq!(field_type, expected);
            assert_eq!(field_type.widget_kind(), widget);
            assert_eq!(field_type.to_string(), keyword);
            assert!(field_type.is_known());
        }
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let field = FieldSpec::parse("color:color").unwrap();
        assert_eq!(field.field_type, FieldType::Custom("color".to_string()));
        assert_eq!(field.field_type.widget_kind(), "color");
        assert!(!field.field_type.is_known());
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let fields = FieldCollection::parse("title:String,body:TEXT").unwrap();

        let title = fields.get("title").unwrap();
        assert_eq!(title.field_type, FieldType::Custom("String".to_string()));
        assert_eq!(title.field_type.to_string(), "String");

        let body = fields.get("body").unwrap();
        assert_eq!(body.field_type.to_string(), "TEXT");
        assert_eq!(body.field_type.widget_kind(), "TEXT");

        assert!(FieldCollection::parse_with("title:String", TypePolicy::Strict).is_err());
    }

    #[test]
    fn test_strict_policy_rejects_unknown_type() {
        let err = FieldCollection::parse_with("title:string,color:colour", TypePolicy::Strict)
            .unwrap_err();
        match err {
            ScaffoldError::UnknownFieldType { field, type_name } => {
                assert_eq!(field, "color");
                assert_eq!(type_name, "colour");
            }
            other => panic!("expected UnknownFieldType, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_empty_collection() {
        assert!(FieldCollection::parse("").unwrap().is_empty());
        assert!(FieldCollection::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        assert!(FieldCollection::parse("title:string,").is_err());
    }

    #[test]
    fn test_order_preserved() {
        let fields = FieldCollection::parse("b:string,a:string,c:text").unwrap();
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let fields = FieldCollection::parse("a:string,b:text,a:integer").unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("a").unwrap().field_type, FieldType::Integer);
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_display() {
        let field = FieldSpec::parse("title:string|required&max:255").unwrap();
        assert_eq!(field.to_string(), "title:string|required&max:255");
    }

    fn ident() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,12}"
    }

    fn mixed_case_ident() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_]{0,12}"
    }

    proptest! {
        #[test]
        fn prop_name_type_has_no_validations(name in ident(), ty in mixed_case_ident()) {
            let fields = FieldCollection::parse(&format!("{name}:{ty}")).unwrap();
            prop_assert_eq!(fields.len(), 1);
            let field = fields.get(&name).unwrap();
            prop_assert_eq!(field.field_type.to_string(), ty);
            prop_assert!(field.validations.is_empty());
        }

        #[test]
        fn prop_validations_keep_order(name in ident(), a in ident(), b in ident()) {
            let field = FieldSpec::parse(&format!("{name}:string|{a}&{b}")).unwrap();
            prop_assert_eq!(field.validations, vec![a, b]);
        }

        #[test]
        fn prop_segment_without_colon_is_malformed(segment in "[a-z_-]{1,20}") {
            let is_malformed = matches!(
                FieldCollection::parse(&segment),
                Err(ScaffoldError::MalformedFieldSpec { .. })
            );
            prop_assert!(is_malformed);
        }
    }
}
