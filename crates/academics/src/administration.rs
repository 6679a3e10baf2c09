//! Academic administration: student selections, class curricula and who
//! may register which accounts

use shared::{ClassDesignEntry, EntityId, ErpError, Result, Role, StudentSummary, TeacherSummary, UserRegistration};

/// Roles a registrar may create accounts for
pub fn registrable_roles(registrar: Role) -> &'static [Role] {
    match registrar {
        Role::SuperStaff => &[Role::AdmissionsStaff, Role::AcademicAdmin, Role::HostelAdmin],
        Role::AcademicAdmin => &[Role::Student, Role::Teacher],
        _ => &[],
    }
}

/// Check a registration before it is sent
pub fn check_registration(registrar: Role, registration: &UserRegistration) -> Result<()> {
    if registration.full_name.trim().is_empty() {
        return Err(ErpError::Validation("Full name is required".to_string()));
    }
    if !registration.email.contains('@') {
        return Err(ErpError::Validation(format!("'{}' is not an email address", registration.email)));
    }
    if registration.password.is_empty() {
        return Err(ErpError::Validation("Password is required".to_string()));
    }
    if !registrable_roles(registrar).contains(&registration.role) {
        return Err(ErpError::Validation(format!(
            "{} cannot register {} accounts",
            registrar.as_str(),
            registration.role.as_str()
        )));
    }
    if registration.role == Role::Student && registration.class_ids.len() != 1 {
        return Err(ErpError::Validation("A student is enrolled in exactly one class".to_string()));
    }
    Ok(())
}

/// Students picked from a class roster, in roster order
pub fn select_students(roster: &[StudentSummary], picked: &[EntityId], class_id: &EntityId) -> Result<Vec<EntityId>> {
    if picked.is_empty() {
        return Err(ErpError::Validation("Select at least one student".to_string()));
    }
    if let Some(stranger) = picked.iter().find(|id| !roster.iter().any(|s| &s.user_id == *id)) {
        return Err(ErpError::Validation(format!(
            "Student {} is not in class {}",
            stranger, class_id
        )));
    }
    Ok(roster
        .iter()
        .filter(|s| picked.contains(&s.user_id))
        .map(|s| s.user_id.clone())
        .collect())
}

/// Build a class curriculum from (subject, teacher) pairs.
///
/// Each subject appears once; the last pairing given for it wins.
pub fn curriculum(pairs: &[(EntityId, EntityId)], teachers: &[TeacherSummary]) -> Result<Vec<ClassDesignEntry>> {
    if pairs.is_empty() {
        return Err(ErpError::Validation(
            "Add at least one subject and teacher to the curriculum".to_string(),
        ));
    }

    let mut entries: Vec<ClassDesignEntry> = Vec::new();
    for (subject_id, teacher_id) in pairs {
        let teacher = teachers
            .iter()
            .find(|t| &t.user_id == teacher_id)
            .ok_or_else(|| ErpError::Validation(format!("Unknown teacher {}", teacher_id)))?;
        if !teacher.teaches(subject_id) {
            return Err(ErpError::Validation(format!(
                "{} does not teach subject {}",
                teacher.full_name, subject_id
            )));
        }

        let entry = ClassDesignEntry { subject_id: subject_id.clone(), teacher_id: teacher_id.clone() };
        match entries.iter_mut().find(|e| &e.subject_id == subject_id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<StudentSummary> {
        serde_json::from_str(
            r#"[
                {"userId": "s-1", "fullName": "Asha"},
                {"userId": "s-2", "fullName": "Bilal"},
                {"userId": "s-3", "fullName": "Chitra"}
            ]"#,
        )
        .unwrap()
    }

    fn teachers() -> Vec<TeacherSummary> {
        serde_json::from_str(
            r#"[
                {"userId": "t-1", "fullName": "Ravi", "taughtSubjects": [{"subjectId": 1, "name": "DBMS"}]},
                {"userId": "t-2", "fullName": "Leela", "taughtSubjects": [
                    {"subjectId": 1, "name": "DBMS"}, {"subjectId": 2, "name": "Networks"}
                ]}
            ]"#,
        )
        .unwrap()
    }

    fn registration(role: Role, class_ids: Vec<EntityId>) -> UserRegistration {
        UserRegistration {
            full_name: "Nisha Rao".to_string(),
            email: "nisha@college.edu".to_string(),
            password: "temp123".to_string(),
            contact_number: None,
            role,
            subject_ids: vec![],
            class_ids,
        }
    }

    // ============== Registration Tests ==============

    #[test]
    fn test_registrable_roles() {
        assert_eq!(registrable_roles(Role::SuperStaff).len(), 3);
        assert!(!registrable_roles(Role::SuperStaff).contains(&Role::Student));
        assert_eq!(registrable_roles(Role::AcademicAdmin), &[Role::Student, Role::Teacher]);
        assert!(registrable_roles(Role::Teacher).is_empty());
    }

    #[test]
    fn test_registration_role_must_be_allowed() {
        let staff = registration(Role::HostelAdmin, vec![]);
        assert!(check_registration(Role::SuperStaff, &staff).is_ok());
        assert!(check_registration(Role::AcademicAdmin, &staff).is_err());

        let teacher = registration(Role::Teacher, vec![]);
        assert!(check_registration(Role::AcademicAdmin, &teacher).is_ok());
        let err = check_registration(Role::SuperStaff, &teacher).unwrap_err();
        assert!(err.to_string().contains("ROLE_TEACHER"));
    }

    #[test]
    fn test_student_needs_one_class() {
        assert!(check_registration(Role::AcademicAdmin, &registration(Role::Student, vec![])).is_err());
        let enrolled = registration(Role::Student, vec![EntityId::from(4)]);
        assert!(check_registration(Role::AcademicAdmin, &enrolled).is_ok());
    }

    #[test]
    fn test_registration_fields_required() {
        let mut reg = registration(Role::Teacher, vec![]);
        reg.email = "nisha".to_string();
        assert!(check_registration(Role::AcademicAdmin, &reg).is_err());

        let mut reg = registration(Role::Teacher, vec![]);
        reg.full_name = "  ".to_string();
        assert!(check_registration(Role::AcademicAdmin, &reg).is_err());
    }

    // ============== Selection Tests ==============

    #[test]
    fn test_select_students_in_roster_order() {
        let picked = vec![EntityId::from("s-3"), EntityId::from("s-1")];
        let ids = select_students(&roster(), &picked, &EntityId::from(2)).unwrap();
        assert_eq!(ids, vec![EntityId::from("s-1"), EntityId::from("s-3")]);
    }

    #[test]
    fn test_select_nobody() {
        let err = select_students(&roster(), &[], &EntityId::from(2)).unwrap_err();
        assert_eq!(err.to_string(), "Select at least one student");
    }

    #[test]
    fn test_select_student_from_elsewhere() {
        let err = select_students(&roster(), &[EntityId::from("s-9")], &EntityId::from(2)).unwrap_err();
        assert_eq!(err.to_string(), "Student s-9 is not in class 2");
    }

    // ============== Curriculum Tests ==============

    #[test]
    fn test_curriculum_pairs() {
        let pairs = vec![
            (EntityId::from(1), EntityId::from("t-1")),
            (EntityId::from(2), EntityId::from("t-2")),
            (EntityId::from(1), EntityId::from("t-2")),
        ];
        let entries = curriculum(&pairs, &teachers()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].teacher_id, EntityId::from("t-2"));
        assert_eq!(entries[1].subject_id, EntityId::from(2));
    }

    #[test]
    fn test_curriculum_rejects_unqualified_teacher() {
        let pairs = vec![(EntityId::from(2), EntityId::from("t-1"))];
        let err = curriculum(&pairs, &teachers()).unwrap_err();
        assert_eq!(err.to_string(), "Ravi does not teach subject 2");
    }

    #[test]
    fn test_curriculum_empty_or_unknown() {
        assert!(curriculum(&[], &teachers()).is_err());
        let pairs = vec![(EntityId::from(1), EntityId::from("t-7"))];
        assert!(curriculum(&pairs, &teachers()).is_err());
    }
}
