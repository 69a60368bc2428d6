use crate::support::{catalog, GatedDirectory};
use spice::directory::InMemoryDirectory;
use spice::skill::{
    shared_control, AssignedSkill, LoadOutcome, Namespace, ProfileSkillSync, SyncStatus,
};
use std::sync::Arc;

fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_profile(
            "Support",
            vec![
                AssignedSkill::atom("english"),
                AssignedSkill::expanded("_queue", "support"),
            ],
        )
        .with_profile(
            "Sales",
            vec![
                AssignedSkill::atom("spanish"),
                AssignedSkill::expanded("_queue", "sales"),
                AssignedSkill::expanded("_brand", "acme"),
            ],
        )
}

#[tokio::test]
async fn superseded_profile_response_is_discarded() {
    let gated = Arc::new(GatedDirectory::new(directory()));
    let release = gated.gate("Support");
    let sync = ProfileSkillSync::new(
        Arc::new(catalog()),
        gated.clone(),
        shared_control("agentProfileSkills"),
    );
    let sync_ref = &sync;

    let (slow, fast) = tokio::join!(sync_ref.select_profile("Support"), async move {
        let report = sync_ref.select_profile("Sales").await;
        let _ = release.send(());
        report
    });

    assert_eq!(slow.status, SyncStatus::Stale);
    assert!(fast.is_settled());
    assert!(fast.generation > slow.generation);

    let control = sync.control().lock();
    assert_eq!(
        control.selected_values(),
        vec![
            "spanish".to_string(),
            "{_brand,acme}".to_string(),
            "{_queue,sales}".to_string()
        ]
    );
    assert!(control.option("{_queue,support}").is_some_and(|o| !o.selected));
    assert_eq!(control.groups().len(), 4);
}

#[tokio::test]
async fn sequential_selections_rebuild_the_control() {
    let sync = ProfileSkillSync::new(
        Arc::new(catalog()),
        Arc::new(directory()),
        shared_control("agentProfileSkills"),
    );

    sync.select_profile("Support").await;
    let report = sync.select_profile("Sales").await;

    assert!(report.is_settled());
    assert_eq!(report.reconcile.selected, 3);
    assert_eq!(
        report.namespaces,
        vec![
            (Namespace::Brand, LoadOutcome::Applied { items: 1 }),
            (Namespace::Queue, LoadOutcome::Applied { items: 2 }),
        ]
    );

    let control = sync.control().lock();
    let labels: Vec<Option<String>> = control.groups().iter().map(|g| g.label.clone()).collect();
    assert_eq!(
        labels,
        vec![
            Some("languages".to_string()),
            Some("system".to_string()),
            Some("_brand".to_string()),
            Some("_queue".to_string()),
        ]
    );
    assert_eq!(control.disabled_values(), vec!["_queue".to_string(), "_brand".to_string()]);
}

#[tokio::test]
async fn unknown_profile_leaves_generic_groups_unselected() {
    let sync = ProfileSkillSync::new(
        Arc::new(catalog()),
        Arc::new(directory()),
        shared_control("agentProfileSkills"),
    );

    let report = sync.select_profile("Nobody").await;

    assert_eq!(report.status, SyncStatus::AssignmentsUnavailable);
    let control = sync.control().lock();
    assert!(control.selected_values().is_empty());
    assert_eq!(control.groups().len(), 2);
    assert!(control.option("_queue").is_some_and(|o| o.disabled));
}
