//! Static entity model: the three record kinds and their field schemas.
//!
//! The model is fixed at compile time. Each kind carries an ordered field
//! schema, a table name, and a primary-key column; everything downstream
//! (statement building, DDL, route resolution, outward messages) is derived
//! from this registry and nothing else.

/// The managed record kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Student,
    Course,
    Enrollment,
}

/// Column type as the API models it. `Enum` fields are stored as text and
/// free-form at the API surface; the kind only drives SQL casts and DDL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Date,
    Enum,
}

impl FieldKind {
    /// Postgres cast applied to the bound placeholder, when text needs
    /// server-side coercion. Text and enum columns bind as-is.
    pub fn pg_cast(self) -> Option<&'static str> {
        match self {
            FieldKind::Integer => Some("bigint"),
            FieldKind::Date => Some("date"),
            FieldKind::Text | FieldKind::Enum => None,
        }
    }

    /// Column type in generated DDL.
    pub fn ddl_type(self) -> &'static str {
        match self {
            FieldKind::Integer => "BIGINT",
            FieldKind::Date => "DATE",
            FieldKind::Text | FieldKind::Enum => "TEXT",
        }
    }
}

/// One column in an entity's schema.
#[derive(Clone, Copy, Debug)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Enforced by the store's NOT NULL constraint, not by the repository.
    pub required_on_create: bool,
}

const fn field(name: &'static str, kind: FieldKind, required_on_create: bool) -> FieldDef {
    FieldDef {
        name,
        kind,
        required_on_create,
    }
}

const STUDENT_FIELDS: &[FieldDef] = &[
    field("admission_number", FieldKind::Text, true),
    field("first_name", FieldKind::Text, true),
    field("last_name", FieldKind::Text, true),
    field("date_of_birth", FieldKind::Date, false),
    field("gender", FieldKind::Enum, false),
    field("email", FieldKind::Text, false),
    field("phone_number", FieldKind::Text, false),
    field("address", FieldKind::Text, false),
    field("enrollment_date", FieldKind::Date, false),
    field("class_id", FieldKind::Integer, false),
    field("parent_guardian_name", FieldKind::Text, false),
    field("parent_contact", FieldKind::Text, false),
];

const COURSE_FIELDS: &[FieldDef] = &[
    field("course_code", FieldKind::Text, true),
    field("course_name", FieldKind::Text, true),
    field("description", FieldKind::Text, false),
    field("credit_hours", FieldKind::Integer, false),
    field("teacher_name", FieldKind::Text, false),
];

const ENROLLMENT_FIELDS: &[FieldDef] = &[
    field("student_id", FieldKind::Integer, true),
    field("course_id", FieldKind::Integer, true),
    field("enrollment_date", FieldKind::Date, false),
    field("grade", FieldKind::Text, false),
    field("status", FieldKind::Enum, false),
];

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Student,
        EntityKind::Course,
        EntityKind::Enrollment,
    ];

    /// Resolve a kind from its URL path segment.
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "students" => Some(EntityKind::Student),
            "courses" => Some(EntityKind::Course),
            "enrollments" => Some(EntityKind::Enrollment),
            _ => None,
        }
    }

    pub fn path_segment(self) -> &'static str {
        match self {
            EntityKind::Student => "students",
            EntityKind::Course => "courses",
            EntityKind::Enrollment => "enrollments",
        }
    }

    pub fn table(self) -> &'static str {
        self.path_segment()
    }

    pub fn primary_key(self) -> &'static str {
        match self {
            EntityKind::Student => "student_id",
            EntityKind::Course => "course_id",
            EntityKind::Enrollment => "enrollment_id",
        }
    }

    /// Capitalized name used in outward messages ("Student not found").
    pub fn display(self) -> &'static str {
        match self {
            EntityKind::Student => "Student",
            EntityKind::Course => "Course",
            EntityKind::Enrollment => "Enrollment",
        }
    }

    /// Lowercase singular used in outward error strings ("Failed to create student").
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::Student => "student",
            EntityKind::Course => "course",
            EntityKind::Enrollment => "enrollment",
        }
    }

    /// The ordered field schema. Total over the enum.
    pub fn schema(self) -> &'static [FieldDef] {
        match self {
            EntityKind::Student => STUDENT_FIELDS,
            EntityKind::Course => COURSE_FIELDS,
            EntityKind::Enrollment => ENROLLMENT_FIELDS,
        }
    }

    pub fn field(self, name: &str) -> Option<&'static FieldDef> {
        self.schema().iter().find(|f| f.name == name)
    }
}
