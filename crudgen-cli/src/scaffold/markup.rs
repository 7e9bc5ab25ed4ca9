//! Field-to-markup compiler
//!
//! Expands a [`FieldCollection`] into the view fragment substituted for the
//! `{{fields}}` token: table header cells for the list view, or one form
//! group per field for the create and edit views.
//!
//! Every form group carries the same `@error` block bound to the field name;
//! the view layer fills it in when that field failed validation.

use super::field_type::{FieldCollection, FieldSpec, FieldType};
use super::helpers::TemplateHelpers;

/// Which view the fragment is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Table header cells for the list view
    List,
    /// Form inputs repopulated from the previous submission
    CreateForm,
    /// Form inputs prefilled from the record being edited
    EditForm,
}

/// Input control generated for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Textarea bound to the client-side rich-text editor
    Wysiwyg,
    /// Styled file picker
    File,
    /// Dropdown with a placeholder option; options are left to fill in by hand
    Select,
    /// Three-row textarea
    TextArea,
    /// Single-line `<input>` of the given type
    Input {
        /// Value of the `type` attribute
        input_type: String,
    },
}

impl Widget {
    /// Pick the widget for a field type
    ///
    /// Everything that is not one of the four dedicated widgets, unknown
    /// types included, becomes a single-line input.
    #[must_use]
    pub fn for_type(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Wysiwyg => Self::Wysiwyg,
            FieldType::File => Self::File,
            FieldType::Enum => Self::Select,
            FieldType::Text => Self::TextArea,
            other => Self::Input {
                input_type: other.widget_kind().to_string(),
            },
        }
    }

    /// Render the form group for `field`
    ///
    /// `value` is the view expression that fills the control and
    /// `required` is either empty or the ` required` attribute.
    #[must_use]
    pub fn render(&self, field: &str, value: &str, required: &str) -> String {
        let label = TemplateHelpers::format_field_name(field);
        let error = error_block(field);

        match self {
            Self::Input { input_type } => format!(
                r#"
<div class="form-group">
    <label for="{field}">{label}</label>
    <input type="{input_type}" name="{field}" id="{field}" class="form-control @error('{field}') is-invalid @enderror" value="{value}"{required}>
{error}
</div>"#
            ),
            Self::TextArea => format!(
                r#"
<div class="form-group">
    <label for="{field}">{label}</label>
    <textarea name="{field}" id="{field}" class="form-control @error('{field}') is-invalid @enderror" rows="3"{required}>{value}</textarea>
{error}
</div>"#
            ),
            Self::Select => format!(
                r#"
<div class="form-group">
    <label for="{field}">{label}</label>
    <select name="{field}" id="{field}" class="form-control @error('{field}') is-invalid @enderror"{required}>
        <option value="">Select {label}</option>
        {{{{-- Add your options here --}}}}
    </select>
{error}
</div>"#
            ),
            Self::File => format!(
                r#"
<div class="form-group">
    <label for="{field}">{label}</label>
    <div class="custom-file">
        <input type="file" name="{field}" id="{field}" class="custom-file-input @error('{field}') is-invalid @enderror"{required}>
        <label class="custom-file-label" for="{field}">Choose file</label>
    </div>
{error}
</div>"#
            ),
            Self::Wysiwyg => format!(
                r#"
<div class="form-group">
    <label for="{field}">{label}</label>
    <textarea name="{field}" id="{field}" class="form-control wysiwyg @error('{field}') is-invalid @enderror"{required}>{value}</textarea>
{error}
</div>
@push('scripts')
<script>
    ClassicEditor
        .create(document.querySelector('#{field}'))
        .catch(error => {{
            console.error(error);
        }});
</script>
@endpush"#
            ),
        }
    }
}

fn error_block(field: &str) -> String {
    format!(
        r#"    @error('{field}')
        <span class="invalid-feedback" role="alert">
            <strong>{{{{ $message }}}}</strong>
        </span>
    @enderror"#
    )
}

/// View expression that fills a field's control
#[must_use]
pub fn value_expression(field: &str, mode: RenderMode) -> String {
    match mode {
        RenderMode::EditForm => format!("{{{{ $item->{field} }}}}"),
        RenderMode::CreateForm | RenderMode::List => format!("{{{{ old('{field}') }}}}"),
    }
}

/// Form group for a single field
#[must_use]
pub fn compile_field(field: &FieldSpec, mode: RenderMode) -> String {
    let value = value_expression(&field.name, mode);
    let required = if field.is_required() { " required" } else { "" };
    Widget::for_type(&field.field_type).render(&field.name, &value, required)
}

/// Fragment for the `{{fields}}` token
#[must_use]
pub fn compile_fields(fields: &FieldCollection, mode: RenderMode) -> String {
    match mode {
        RenderMode::List => fields
            .iter()
            .map(|field| format!("<th>{}</th>\n", TemplateHelpers::format_field_name(&field.name)))
            .collect(),
        RenderMode::CreateForm | RenderMode::EditForm => fields
            .iter()
            .map(|field| compile_field(field, mode))
            .collect(),
    }
}

/// Fragment for the `{{rowFields}}` token: one table cell per field
#[must_use]
pub fn compile_row_cells(fields: &FieldCollection) -> String {
    fields
        .iter()
        .map(|field| format!("<td>{{{{ $item->{} }}}}</td>\n", field.name))
        .collect()
}
