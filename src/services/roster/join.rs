use tracing::info;

use super::RosterService;
use crate::errors::{AttendlyError, Result};
use crate::models::classes::entities::JoinedClass;

pub async fn join(service: &RosterService, member_id: &str, code: &str) -> Result<JoinedClass> {
    let member_id = member_id.trim();
    if member_id.is_empty() || code.trim().is_empty() {
        return Err(AttendlyError::bad_input(
            "Student ID and invitation code are required",
        ));
    }

    let class = service.classes.resolve_by_code(code).await?;
    join_class(service, &class.id, member_id).await
}

pub async fn join_class(
    service: &RosterService,
    class_id: &str,
    member_id: &str,
) -> Result<JoinedClass> {
    let class_id = class_id.trim();
    let member_id = member_id.trim();
    if class_id.is_empty() || member_id.is_empty() {
        return Err(AttendlyError::bad_input("Class ID and student ID are required"));
    }

    let change = service
        .classes
        .classes()
        .add_member(class_id, member_id)
        .await?
        .ok_or_else(|| AttendlyError::not_found("Class not found"))?;

    if !change.changed {
        return Err(AttendlyError::conflict("Already enrolled in this class"));
    }

    info!("Member {} joined class {}", member_id, class_id);
    let joined_at = change.class.updated_at;
    Ok(JoinedClass {
        class: change.class,
        joined_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Severity;
    use crate::services::classes::test_support::{class_service, new_class};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_second_join_conflicts() {
        let classes = class_service();
        let roster = RosterService::new(classes.clone());
        let class = classes.create_class(new_class("t1", "CS", "A")).await.unwrap();

        let joined = roster.join("u1", &class.class_code).await.unwrap();
        assert!(joined.class.has_member("u1"));
        assert_eq!(joined.joined_at, joined.class.updated_at);

        let err = roster.join("u1", &class.class_code).await.unwrap_err();
        assert_eq!(err.severity(), Severity::Conflict);

        let stored = classes.classes().get(&class.id).await.unwrap().unwrap();
        assert_eq!(stored.students, vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn test_join_rejects_bad_input() {
        let classes = class_service();
        let roster = RosterService::new(classes);

        let err = roster.join("", "CS-A-0000000000").await.unwrap_err();
        assert_eq!(err.severity(), Severity::BadInput);

        let err = roster.join("u1", "CS-A-0000000000").await.unwrap_err();
        assert_eq!(err.severity(), Severity::NotFound);
        assert_eq!(err.message(), "Invalid invitation code");

        let err = roster.join_class("missing", "u1").await.unwrap_err();
        assert_eq!(err.message(), "Class not found");

        let err = roster.join_class("  ", "u1").await.unwrap_err();
        assert_eq!(err.severity(), Severity::BadInput);
    }

    #[tokio::test]
    async fn test_join_class_trims_ids() {
        let classes = class_service();
        let roster = RosterService::new(classes.clone());
        let class = classes.create_class(new_class("t1", "CS", "A")).await.unwrap();

        let joined = roster
            .join_class(&format!(" {} ", class.id), " u1 ")
            .await
            .unwrap();
        assert_eq!(joined.class.students, vec!["u1".to_string()]);

        let err = roster.join_class(&class.id, "u1").await.unwrap_err();
        assert_eq!(err.severity(), Severity::Conflict);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_all_land() {
        let classes = class_service();
        let roster = RosterService::new(classes.clone());
        let class = classes.create_class(new_class("t1", "CS", "A")).await.unwrap();

        let handles: Vec<_> = (0..24)
            .map(|i| {
                let roster = roster.clone();
                let code = class.class_code.clone();
                tokio::spawn(async move { roster.join(&format!("u{i}"), &code).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = classes.classes().get(&class.id).await.unwrap().unwrap();
        let members: HashSet<_> = stored.students.iter().cloned().collect();
        assert_eq!(stored.students.len(), 24);
        assert_eq!(members.len(), 24);
    }
}
