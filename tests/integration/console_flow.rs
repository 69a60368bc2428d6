use crate::support::{agent, catalog};
use spice::config::ConsoleConfig;
use spice::console::{ActiveEditor, AgentsConsole, DestroyOutcome};
use spice::directory::{InMemoryDirectory, TreeItem};
use spice::skill::{AssignedSkill, SyncStatus};
use std::sync::Arc;

fn directory() -> Arc<InMemoryDirectory> {
    Arc::new(
        InMemoryDirectory::new()
            .with_profile("Default", vec![AssignedSkill::atom("english")])
            .with_profile("Night", vec![AssignedSkill::expanded("_queue", "sales")])
            .with_agent(agent(
                "jdoe",
                "Night",
                vec![
                    AssignedSkill::atom("english"),
                    AssignedSkill::expanded("_brand", "acme"),
                ],
            ))
            .with_protected("Default", "The default profile cannot be deleted"),
    )
}

fn console(directory: &Arc<InMemoryDirectory>) -> AgentsConsole {
    AgentsConsole::new(
        directory.clone(),
        Arc::new(catalog()),
        &ConsoleConfig::default(),
    )
}

#[tokio::test]
async fn default_profile_name_is_locked() {
    let directory = directory();
    let mut console = console(&directory);

    let report = console.on_tree_click(TreeItem::profile("Default")).await.unwrap();
    assert!(report.is_settled());

    let editor = console.profile_editor_mut().unwrap();
    assert!(!editor.is_name_editable());
    assert!(!editor.set_name("Renamed"));

    let update = console.profile_update().unwrap();
    assert_eq!(update.old_name, "Default");
    assert_eq!(update.name, "Default");
    assert_eq!(update.skills, vec!["english".to_string()]);
}

#[tokio::test]
async fn renamed_profile_update_carries_old_name() {
    let directory = directory();
    let mut console = console(&directory);

    console.on_tree_click(TreeItem::profile("Night")).await.unwrap();
    assert!(console.profile_editor_mut().unwrap().set_name("Late Night"));

    let update = console.profile_update().unwrap();
    assert_eq!(update.old_name, "Night");
    assert_eq!(update.name, "Late Night");
    assert_eq!(update.skills, vec!["{_queue,sales}".to_string()]);
    assert!(console.agent_update().is_none());
}

#[tokio::test]
async fn agent_selection_reconciles_initialized_control() {
    let directory = directory();
    let mut console = console(&directory);

    let init = console.init_skills().await;
    assert!(init.is_settled());
    assert!(console.agent_skills().lock().selected_values().is_empty());

    let report = console.on_tree_click(TreeItem::agent("jdoe")).await.unwrap();
    assert_eq!(report.status, SyncStatus::Settled);

    match console.active() {
        ActiveEditor::Agent(editor) => {
            assert_eq!(editor.login, "jdoe");
            assert_eq!(editor.integrated, "true");
            assert_eq!(editor.security_level, 3);
            assert_eq!(editor.profile, "Night");
        }
        other => panic!("expected agent editor, got {:?}", other),
    }

    let update = console.agent_update().unwrap();
    assert_eq!(update.old_login, "jdoe");
    assert_eq!(
        update.skills,
        vec!["english".to_string(), "{_brand,acme}".to_string()]
    );
    assert!(console.agent_skills().lock().option("_brand").is_some_and(|o| o.disabled));
}

#[tokio::test]
async fn unknown_agent_is_a_soft_error() {
    let directory = directory();
    let mut console = console(&directory);

    let err = console.on_tree_click(TreeItem::agent("ghost")).await.unwrap_err();
    assert!(err.is_soft());
    assert_eq!(console.active(), &ActiveEditor::None);
}

#[tokio::test]
async fn destroy_deletes_selection_or_reports_rejection() {
    let directory = directory();
    let mut console = console(&directory);

    assert_eq!(
        console.destroy_selected().await.unwrap(),
        DestroyOutcome::NothingSelected
    );

    console.on_tree_click(TreeItem::profile("Default")).await.unwrap();
    assert_eq!(
        console.destroy_selected().await.unwrap(),
        DestroyOutcome::Rejected("The default profile cannot be deleted".to_string())
    );
    assert!(directory.has_profile("Default"));
    assert!(matches!(console.active(), ActiveEditor::Profile(_)));

    console.on_tree_click(TreeItem::agent("jdoe")).await.unwrap();
    assert_eq!(
        console.destroy_selected().await.unwrap(),
        DestroyOutcome::Deleted
    );
    assert!(!directory.has_agent("jdoe"));
    assert!(console.selected().is_none());
    assert_eq!(console.active(), &ActiveEditor::None);
}

#[tokio::test]
async fn failed_agent_click_after_profile_closes_the_editor() {
    let directory = directory();
    let mut console = console(&directory);

    console.on_tree_click(TreeItem::profile("Night")).await.unwrap();
    assert!(console.profile_update().is_some());

    assert!(console.on_tree_click(TreeItem::agent("ghost")).await.is_err());

    assert!(console.selected().is_none());
    assert_eq!(console.active(), &ActiveEditor::None);
    assert!(console.profile_update().is_none());
    assert!(console.agent_update().is_none());
    assert_eq!(
        console.destroy_selected().await.unwrap(),
        DestroyOutcome::NothingSelected
    );
    assert!(directory.has_profile("Night"));
}
