//! Naming helpers for code generation
//!
//! Naming conventions shared by the renderer, the markup compiler and the
//! emitter: labels, lower-cased plural and singular resource names, and the
//! controller class name.

use inflector::Inflector;

/// Naming helpers for stub substitution
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Human-readable label for a field name
    ///
    /// Underscores become spaces and the first letter of every word is
    /// upper-cased; the rest of each word is left alone.
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen_lib::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::format_field_name("published_at"), "Published At");
    /// assert_eq!(TemplateHelpers::format_field_name("isbn_ID"), "Isbn ID");
    /// ```
    #[must_use]
    pub fn format_field_name(field: &str) -> String {
        let spaced = field.replace('_', " ");
        let mut label = String::with_capacity(spaced.len());
        let mut at_word_start = true;

        for ch in spaced.chars() {
            if at_word_start {
                label.extend(ch.to_uppercase());
            } else {
                label.push(ch);
            }
            at_word_start = ch.is_whitespace();
        }

        label
    }

    /// Lower-cased plural of a resource name, used for view directories and routes
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen_lib::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::plural_lower("Post"), "posts");
    /// assert_eq!(TemplateHelpers::plural_lower("Category"), "categories");
    /// ```
    ///
    /// # Note
    ///
    /// The inflector library has known limitations with some irregular plurals.
    /// This is acceptable for code generation as model names are typically regular words.
    #[must_use]
    pub fn plural_lower(model: &str) -> String {
        model.to_lowercase().to_plural()
    }

    /// Lower-cased resource name, used for single-record variables
    ///
    /// # Examples
    ///
    /// ```
    /// # use crudgen_lib::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::singular_lower("UserProfile"), "userprofile");
    /// ```
    #[must_use]
    pub fn singular_lower(model: &str) -> String {
        model.to_lowercase()
    }

    /// Controller class name for a resource
    #[must_use]
    pub fn controller_name(model: &str) -> String {
        format!("{model}Controller")
    }

    /// Whether a resource name is usable as a class name
    ///
    /// It must start with an ASCII letter and contain only ASCII
    /// alphanumerics or underscores.
    #[must_use]
    pub fn is_valid_resource_name(model: &str) -> bool {
        model.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && model.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
}
