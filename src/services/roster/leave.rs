use tracing::info;

use super::RosterService;
use crate::errors::{AttendlyError, Result};
use crate::models::classes::entities::ClassRecord;

pub async fn leave(service: &RosterService, class_id: &str, member_id: &str) -> Result<ClassRecord> {
    let class = remove(service, class_id, member_id).await?;
    info!("Member {} left class {}", member_id, class_id);
    Ok(class)
}

pub async fn remove_member(
    service: &RosterService,
    class_id: &str,
    member_id: &str,
) -> Result<ClassRecord> {
    let class = remove(service, class_id, member_id).await?;
    info!("Member {} removed from class {}", member_id, class_id);
    Ok(class)
}

async fn remove(service: &RosterService, class_id: &str, member_id: &str) -> Result<ClassRecord> {
    let class_id = class_id.trim();
    let member_id = member_id.trim();
    if class_id.is_empty() || member_id.is_empty() {
        return Err(AttendlyError::bad_input("Class ID and student ID are required"));
    }

    let change = service
        .classes
        .classes()
        .remove_member(class_id, member_id)
        .await?
        .ok_or_else(|| AttendlyError::not_found("Class not found"))?;

    if !change.changed {
        return Err(AttendlyError::conflict(
            "Student is not enrolled in this class",
        ));
    }
    Ok(change.class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Severity;
    use crate::services::classes::test_support::{class_service, new_class};

    #[tokio::test]
    async fn test_leave_preserves_order() {
        let classes = class_service();
        let roster = RosterService::new(classes.clone());
        let class = classes.create_class(new_class("t1", "CS", "A")).await.unwrap();
        for member in ["a", "b", "c", "d"] {
            roster.join_class(&class.id, member).await.unwrap();
        }

        let before = classes.classes().get(&class.id).await.unwrap().unwrap();
        let after = roster.leave(&class.id, "b").await.unwrap();
        assert_eq!(after.students, vec!["a", "c", "d"]);
        assert!(after.updated_at > before.updated_at);
    }

    #[tokio::test]
    async fn test_leave_non_member_conflicts() {
        let classes = class_service();
        let roster = RosterService::new(classes.clone());
        let class = classes.create_class(new_class("t1", "CS", "A")).await.unwrap();
        roster.join_class(&class.id, "u1").await.unwrap();

        let err = roster.leave(&class.id, "u2").await.unwrap_err();
        assert_eq!(err.severity(), Severity::Conflict);
        assert_eq!(err.message(), "Student is not enrolled in this class");

        let stored = classes.classes().get(&class.id).await.unwrap().unwrap();
        assert_eq!(stored.students, vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn test_leave_with_padded_ids() {
        let classes = class_service();
        let roster = RosterService::new(classes.clone());
        let class = classes.create_class(new_class("t1", "CS", "A")).await.unwrap();

        let joined = roster.join(" u1 ", &class.class_code).await.unwrap();
        assert_eq!(joined.class.students, vec!["u1".to_string()]);

        let after = roster.leave(&format!(" {} ", class.id), " u1 ").await.unwrap();
        assert!(after.students.is_empty());

        roster.join_class(&class.id, "u2").await.unwrap();
        let after = roster.remove_member(&class.id, "\tu2 ").await.unwrap();
        assert!(after.students.is_empty());
    }

    #[tokio::test]
    async fn test_remove_from_missing_class() {
        let roster = RosterService::new(class_service());
        let err = roster.remove_member("missing", "u1").await.unwrap_err();
        assert_eq!(err.severity(), Severity::NotFound);
        assert_eq!(err.message(), "Class not found");
    }
}
