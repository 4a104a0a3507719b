//! Record types served by the dashboard's list pages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Teachers,
    Students,
    Parents,
    Subjects,
    Classes,
    Lessons,
    Exams,
    Assignments,
    Results,
    Attendance,
    Events,
    Announcements,
}

/// Per-entity list settings: which fields free-text search looks at and
/// which URL keys are accepted as facet filters (URL key, record path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    pub search_fields: &'static [&'static str],
    pub filter_fields: &'static [(&'static str, &'static str)],
}

impl EntityKind {
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Teachers,
        EntityKind::Students,
        EntityKind::Parents,
        EntityKind::Subjects,
        EntityKind::Classes,
        EntityKind::Lessons,
        EntityKind::Exams,
        EntityKind::Assignments,
        EntityKind::Results,
        EntityKind::Attendance,
        EntityKind::Events,
        EntityKind::Announcements,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Teachers => "teachers",
            EntityKind::Students => "students",
            EntityKind::Parents => "parents",
            EntityKind::Subjects => "subjects",
            EntityKind::Classes => "classes",
            EntityKind::Lessons => "lessons",
            EntityKind::Exams => "exams",
            EntityKind::Assignments => "assignments",
            EntityKind::Results => "results",
            EntityKind::Attendance => "attendance",
            EntityKind::Events => "events",
            EntityKind::Announcements => "announcements",
        }
    }

    /// Dashboard page listing this entity; the route access table is keyed
    /// on it.
    pub fn list_path(&self) -> String {
        format!("/list/{}", self.as_str())
    }

    pub fn list_config(&self) -> ListConfig {
        match self {
            EntityKind::Teachers => ListConfig {
                search_fields: &["name", "surname", "email", "subjects.name"],
                filter_fields: &[("classId", "lessons.classId"), ("subjectId", "subjects.id")],
            },
            EntityKind::Students => ListConfig {
                search_fields: &["name", "surname", "email"],
                filter_fields: &[
                    ("classId", "classId"),
                    ("gradeId", "gradeId"),
                    ("teacherId", "class.lessons.teacherId"),
                    ("parentId", "parentId"),
                    ("sex", "sex"),
                    ("bloodType", "bloodType"),
                ],
            },
            EntityKind::Parents => ListConfig {
                search_fields: &["name", "surname", "email", "students.name"],
                filter_fields: &[("studentId", "students.id")],
            },
            EntityKind::Subjects => ListConfig {
                search_fields: &["name"],
                filter_fields: &[("teacherId", "teachers.id")],
            },
            EntityKind::Classes => ListConfig {
                search_fields: &["name", "supervisor.name", "supervisor.surname"],
                filter_fields: &[("supervisorId", "supervisorId"), ("gradeId", "gradeId")],
            },
            EntityKind::Lessons => ListConfig {
                search_fields: &["name", "subject.name", "teacher.name", "class.name"],
                filter_fields: &[
                    ("classId", "classId"),
                    ("teacherId", "teacherId"),
                    ("subjectId", "subjectId"),
                    ("day", "day"),
                ],
            },
            EntityKind::Exams | EntityKind::Assignments => ListConfig {
                search_fields: &[
                    "title",
                    "lesson.subject.name",
                    "lesson.teacher.name",
                    "lesson.class.name",
                ],
                filter_fields: &[
                    ("classId", "lesson.classId"),
                    ("teacherId", "lesson.teacherId"),
                    ("subjectId", "lesson.subjectId"),
                ],
            },
            EntityKind::Results => ListConfig {
                search_fields: &[
                    "exam.title",
                    "assignment.title",
                    "student.name",
                    "student.surname",
                ],
                filter_fields: &[
                    ("studentId", "studentId"),
                    ("examId", "examId"),
                    ("assignmentId", "assignmentId"),
                    ("classId", "student.classId"),
                ],
            },
            EntityKind::Attendance => ListConfig {
                search_fields: &["student.name", "student.surname", "lesson.name"],
                filter_fields: &[
                    ("studentId", "studentId"),
                    ("lessonId", "lessonId"),
                    ("present", "present"),
                    ("classId", "lesson.classId"),
                ],
            },
            EntityKind::Events | EntityKind::Announcements => ListConfig {
                search_fields: &["title", "description", "class.name"],
                filter_fields: &[("classId", "classId")],
            },
        }
    }

    /// Record path behind the facet URL key `key`, if the entity accepts it.
    pub fn filter_path(&self, key: &str) -> Option<&'static str> {
        self.list_config()
            .filter_fields
            .iter()
            .find(|(url_key, _)| *url_key == key)
            .map(|(_, path)| *path)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntityError(pub String);

impl fmt::Display for ParseEntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown entity: {}", self.0)
    }
}

impl std::error::Error for ParseEntityError {}

impl FromStr for EntityKind {
    type Err = ParseEntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|entity| entity.as_str() == s)
            .ok_or_else(|| ParseEntityError(s.to_string()))
    }
}
