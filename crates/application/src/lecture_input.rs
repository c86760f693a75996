//! Raw lecture input and its validation
//!
//! Drafts arrive with every field optional so that absent fields can be
//! reported together. Validation accumulates all problems into a single
//! [`ValidationErrors`] keyed by the camelCase field name.

use std::borrow::Cow;

use domain::entities::{
    FieldChange, LectureField, LecturePatch, Material, MaterialKind, NewLecture,
};
use domain::value_objects::{ClockTime, LectureCategory, LectureDate};
use validator::{Validate, ValidationError, ValidationErrors};

/// Error code marking a required field that was absent or empty
pub const REQUIRED: &str = "required";

/// Raw material input
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct MaterialDraft {
    /// Existing id, generated when absent
    pub id: Option<String>,
    /// Display name
    #[validate(length(min = 1, message = "Material name must not be empty"))]
    pub name: String,
    /// `document`, `image` or `link` (`pdf` is read as `document`)
    pub kind: String,
    /// Resource location
    #[validate(url(message = "Material URL is not a valid URL"))]
    pub url: String,
}

/// Raw creation input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureDraft {
    pub title: Option<String>,
    pub instructor: Option<String>,
    pub description: Option<String>,
    pub full_description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub max_students: Option<u32>,
    pub materials: Option<Vec<MaterialDraft>>,
}

impl LectureDraft {
    /// Validate every field and build the creation data
    ///
    /// # Errors
    ///
    /// Returns all missing and malformed fields at once.
    pub fn validate_into(self) -> Result<NewLecture, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required_text(&mut errors, LectureField::Title, self.title);
        let instructor = required_text(&mut errors, LectureField::Instructor, self.instructor);
        let description = required_text(&mut errors, LectureField::Description, self.description);
        let start_time = required_text(&mut errors, LectureField::StartTime, self.start_time)
            .and_then(|s| parse_time(&mut errors, LectureField::StartTime, &s));
        let end_time = required_text(&mut errors, LectureField::EndTime, self.end_time)
            .and_then(|s| parse_time(&mut errors, LectureField::EndTime, &s));
        let date = required_text(&mut errors, LectureField::Date, self.date)
            .and_then(|s| parse_date(&mut errors, &s));
        let category = required_text(&mut errors, LectureField::Category, self.category)
            .and_then(|s| parse_category(&mut errors, &s));
        let materials = self
            .materials
            .map(|drafts| convert_materials(&mut errors, drafts))
            .unwrap_or_default();

        match (
            title,
            instructor,
            description,
            start_time,
            end_time,
            date,
            category,
        ) {
            (
                Some(title),
                Some(instructor),
                Some(description),
                Some(start_time),
                Some(end_time),
                Some(date),
                Some(category),
            ) if errors.errors().is_empty() => Ok(NewLecture {
                title,
                instructor,
                description,
                full_description: non_blank(self.full_description),
                start_time,
                end_time,
                date,
                category,
                location: non_blank(self.location),
                max_students: self.max_students,
                materials,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw update input
///
/// `None` means "leave unchanged". For optional columns `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LectureChanges {
    pub title: Option<String>,
    pub instructor: Option<String>,
    pub description: Option<String>,
    pub full_description: Option<Option<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub location: Option<Option<String>>,
    pub max_students: Option<Option<u32>>,
    pub materials: Option<Vec<MaterialDraft>>,
}

impl LectureChanges {
    /// Validate the supplied fields and build a typed patch
    ///
    /// # Errors
    ///
    /// Returns all malformed or emptied fields at once.
    pub fn validate_into(self) -> Result<LecturePatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut patch = LecturePatch::new();

        if let Some(v) = supplied_text(&mut errors, LectureField::Title, self.title) {
            patch.set(FieldChange::Title(v));
        }
        if let Some(v) = supplied_text(&mut errors, LectureField::Instructor, self.instructor) {
            patch.set(FieldChange::Instructor(v));
        }
        if let Some(v) = supplied_text(&mut errors, LectureField::Description, self.description) {
            patch.set(FieldChange::Description(v));
        }
        if let Some(v) = self.full_description {
            patch.set(FieldChange::FullDescription(non_blank(v)));
        }
        if let Some(t) = supplied_text(&mut errors, LectureField::StartTime, self.start_time)
            .and_then(|s| parse_time(&mut errors, LectureField::StartTime, &s))
        {
            patch.set(FieldChange::StartTime(t));
        }
        if let Some(t) = supplied_text(&mut errors, LectureField::EndTime, self.end_time)
            .and_then(|s| parse_time(&mut errors, LectureField::EndTime, &s))
        {
            patch.set(FieldChange::EndTime(t));
        }
        if let Some(d) = supplied_text(&mut errors, LectureField::Date, self.date)
            .and_then(|s| parse_date(&mut errors, &s))
        {
            patch.set(FieldChange::Date(d));
        }
        if let Some(c) = supplied_text(&mut errors, LectureField::Category, self.category)
            .and_then(|s| parse_category(&mut errors, &s))
        {
            patch.set(FieldChange::Category(c));
        }
        if let Some(v) = self.location {
            patch.set(FieldChange::Location(non_blank(v)));
        }
        if let Some(v) = self.max_students {
            patch.set(FieldChange::MaxStudents(v));
        }
        if let Some(drafts) = self.materials {
            patch.set(FieldChange::Materials(convert_materials(&mut errors, drafts)));
        }

        if errors.errors().is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

/// Names of the fields reported as missing, in field order
#[must_use]
pub fn missing_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .into_iter()
        .filter(|(_, list)| list.iter().any(|e| e.code == REQUIRED))
        .map(|(field, _)| field.to_string())
        .collect();
    fields.sort_by_key(|f| field_rank(f));
    fields
}

fn field_rank(name: &str) -> usize {
    LectureField::ALL
        .iter()
        .position(|f| f.as_str() == name)
        .unwrap_or(LectureField::ALL.len())
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn required_text(
    errors: &mut ValidationErrors,
    field: LectureField,
    value: Option<String>,
) -> Option<String> {
    match non_blank(value) {
        Some(v) => Some(v),
        None => {
            errors.add(
                field.as_str(),
                field_error(REQUIRED, format!("{field} is required")),
            );
            None
        },
    }
}

fn supplied_text(
    errors: &mut ValidationErrors,
    field: LectureField,
    value: Option<String>,
) -> Option<String> {
    let value = value?;
    if value.trim().is_empty() {
        errors.add(
            field.as_str(),
            field_error("empty", format!("{field} must not be empty")),
        );
        return None;
    }
    Some(value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_time(errors: &mut ValidationErrors, field: LectureField, s: &str) -> Option<ClockTime> {
    ClockTime::parse(s)
        .map_err(|_| {
            errors.add(
                field.as_str(),
                field_error("invalid_time", "Invalid time format. Use HH:MM"),
            );
        })
        .ok()
}

fn parse_date(errors: &mut ValidationErrors, s: &str) -> Option<LectureDate> {
    LectureDate::parse(s)
        .map_err(|_| {
            errors.add(
                LectureField::Date.as_str(),
                field_error("invalid_date", "Invalid date format. Use YYYY-MM-DD"),
            );
        })
        .ok()
}

fn parse_category(errors: &mut ValidationErrors, s: &str) -> Option<LectureCategory> {
    s.parse::<LectureCategory>()
        .map_err(|_| {
            let expected: Vec<&str> = LectureCategory::all().iter().map(|c| c.as_str()).collect();
            errors.add(
                LectureField::Category.as_str(),
                field_error(
                    "invalid_category",
                    format!("Unknown category. Expected one of: {}", expected.join(", ")),
                ),
            );
        })
        .ok()
}

fn convert_materials(errors: &mut ValidationErrors, drafts: Vec<MaterialDraft>) -> Vec<Material> {
    let field = LectureField::Materials.as_str();
    let mut materials = Vec::with_capacity(drafts.len());

    for (index, draft) in drafts.into_iter().enumerate() {
        let mut valid = true;

        if let Err(item_errors) = draft.validate() {
            valid = false;
            for (name, list) in item_errors.field_errors() {
                for e in list {
                    let detail = e
                        .message
                        .as_ref()
                        .map_or_else(|| e.code.to_string(), ToString::to_string);
                    errors.add(
                        field,
                        field_error("invalid_material", format!("materials[{index}].{name}: {detail}")),
                    );
                }
            }
        }

        let kind = draft.kind.parse::<MaterialKind>();
        if kind.is_err() {
            valid = false;
            errors.add(
                field,
                field_error(
                    "invalid_material",
                    format!(
                        "materials[{index}].type: expected document, image or link, got '{}'",
                        draft.kind
                    ),
                ),
            );
        }

        if let (true, Ok(kind)) = (valid, kind) {
            let material = Material::new(draft.name, kind, draft.url);
            materials.push(match draft.id.filter(|id| !id.trim().is_empty()) {
                Some(id) => material.with_id(id),
                None => material,
            });
        }
    }

    materials
}
