//! Role-based visibility scoping.
//!
//! Every list query is ANDed with the condition returned here. The match is
//! exhaustive over `(Role, EntityKind)`, so adding a role or an entity fails
//! to compile until its visibility has been decided. Only admin is
//! unrestricted.

use schooldesk_core::Role;

use crate::assembler::BaseQuery;
use crate::entity::EntityKind;
use crate::filter::FilterExpression;

pub struct RoleScopeResolver;

impl RoleScopeResolver {
    /// Condition restricting `entity` to what `user_id` acting as `role`
    /// may see.
    pub fn scope(role: Role, entity: EntityKind, user_id: &str) -> FilterExpression {
        use EntityKind::*;

        let me = |field: &str| FilterExpression::equals(field, user_id);
        // Announcements and events without a class are school-wide.
        let school_wide_or = |field: &str| FilterExpression::is_null("classId").or(me(field));

        match (role, entity) {
            (Role::Admin, _) => FilterExpression::Empty,

            (Role::Teacher, Teachers) => me("id"),
            (Role::Teacher, Students) => me("class.lessons.teacherId"),
            (Role::Teacher, Parents) => me("students.class.lessons.teacherId"),
            (Role::Teacher, Subjects) => me("teachers.id"),
            (Role::Teacher, Classes) => me("supervisorId").or(me("lessons.teacherId")),
            (Role::Teacher, Lessons) => me("teacherId"),
            (Role::Teacher, Exams | Assignments | Attendance) => me("lesson.teacherId"),
            (Role::Teacher, Results) => {
                me("exam.lesson.teacherId").or(me("assignment.lesson.teacherId"))
            }
            (Role::Teacher, Events | Announcements) => school_wide_or("class.lessons.teacherId"),

            (Role::Student, Teachers) => me("lessons.class.students.id"),
            (Role::Student, Students) => me("id"),
            (Role::Student, Parents) => me("students.id"),
            (Role::Student, Subjects) => me("lessons.class.students.id"),
            (Role::Student, Classes) => me("students.id"),
            (Role::Student, Lessons) => me("class.students.id"),
            (Role::Student, Exams | Assignments) => me("lesson.class.students.id"),
            (Role::Student, Results | Attendance) => me("studentId"),
            (Role::Student, Events | Announcements) => school_wide_or("class.students.id"),

            (Role::Parent, Teachers) => me("lessons.class.students.parentId"),
            (Role::Parent, Students) => me("parentId"),
            (Role::Parent, Parents) => me("id"),
            (Role::Parent, Subjects) => me("lessons.class.students.parentId"),
            (Role::Parent, Classes) => me("students.parentId"),
            (Role::Parent, Lessons) => me("class.students.parentId"),
            (Role::Parent, Exams | Assignments) => me("lesson.class.students.parentId"),
            (Role::Parent, Results | Attendance) => me("student.parentId"),
            (Role::Parent, Events | Announcements) => school_wide_or("class.students.parentId"),
        }
    }

    /// Starting query for a list request: the role scope and nothing else.
    pub fn base_query(role: Role, entity: EntityKind, user_id: &str) -> BaseQuery {
        BaseQuery::new(Self::scope(role, entity, user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_is_unrestricted() {
        for entity in EntityKind::ALL {
            assert_eq!(
                RoleScopeResolver::scope(Role::Admin, entity, "a1"),
                FilterExpression::Empty
            );
        }
    }

    #[test]
    fn test_other_roles_are_always_restricted() {
        for role in [Role::Teacher, Role::Student, Role::Parent] {
            for entity in EntityKind::ALL {
                assert!(
                    !RoleScopeResolver::scope(role, entity, "u1").is_empty(),
                    "{role} on {entity} must be scoped"
                );
            }
        }
    }

    #[test]
    fn test_teacher_classes_supervised_or_taught() {
        assert_eq!(
            RoleScopeResolver::scope(Role::Teacher, EntityKind::Classes, "t1"),
            FilterExpression::Or(vec![
                FilterExpression::equals("supervisorId", "t1"),
                FilterExpression::equals("lessons.teacherId", "t1"),
            ])
        );
    }

    #[test]
    fn test_events_include_school_wide() {
        assert_eq!(
            RoleScopeResolver::scope(Role::Parent, EntityKind::Events, "p1"),
            FilterExpression::Or(vec![
                FilterExpression::is_null("classId"),
                FilterExpression::equals("class.students.parentId", "p1"),
            ])
        );
    }

    #[test]
    fn test_student_results() {
        assert_eq!(
            RoleScopeResolver::scope(Role::Student, EntityKind::Results, "s1"),
            FilterExpression::equals("studentId", "s1")
        );
    }

    #[test]
    fn test_base_query_carries_scope() {
        let base = RoleScopeResolver::base_query(Role::Teacher, EntityKind::Lessons, "t9");
        assert_eq!(base.where_clause, FilterExpression::equals("teacherId", "t9"));
    }
}
