mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use common::FakeApi;
use fitness_admin::api::ApiError;
use fitness_admin::models::{Group, GroupDraft, GroupPatch, GroupQuery};
use fitness_admin::store::{fallback, GroupStore, OFFLINE_ADVISORY};
use fitness_admin::ErrorKind;

#[tokio::test]
async fn test_network_error_falls_back_to_sample_groups() {
    let api = FakeApi::<Group>::unreachable();
    let mut store = GroupStore::new(api.clone());

    store.fetch_all(&GroupQuery::default()).await.unwrap();

    assert!(store.is_offline());
    assert!(!store.is_loading());
    assert_eq!(store.items().len(), 4);
    let error = store.error().unwrap();
    assert_eq!(error.kind, ErrorKind::Connectivity);
    assert!(error.detail.contains("offline mode"));
    assert_eq!(error.detail, OFFLINE_ADVISORY);
}

#[tokio::test]
async fn test_offline_create_never_reaches_the_network() {
    let api = FakeApi::<Group>::unreachable();
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();
    let calls = api.calls();

    let group = store.create(GroupDraft::new("Test Group")).await.unwrap();

    assert_eq!(api.calls(), calls);
    let suffix = group.id.strip_prefix("mock-").unwrap();
    assert!(!suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(store.items().len(), 5);
    assert_eq!(store.items().last().map(|g| g.name.as_str()), Some("Test Group"));
    assert_eq!(group.organizer.name, "Current User");
    assert!(store.error().is_none());
}

#[tokio::test]
async fn test_rapid_offline_creates_get_distinct_ids() {
    let mut store = GroupStore::new(FakeApi::<Group>::unreachable());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    let first = store.create(GroupDraft::new("One")).await.unwrap();
    let second = store.create(GroupDraft::new("Two")).await.unwrap();
    let third = store.create(GroupDraft::new("Three")).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(second.id, third.id);
    assert_ne!(first.id, third.id);
}

#[tokio::test]
async fn test_offline_mutations_stay_local() {
    let api = FakeApi::<Group>::unreachable();
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();
    let calls = api.calls();

    let updated = store
        .update(
            "3",
            GroupPatch {
                description: Some("Saturday and Sunday sessions".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Weekend Warriors");
    assert_eq!(updated.description.as_deref(), Some("Saturday and Sunday sessions"));

    store.delete("1").await.unwrap();
    assert_eq!(store.items().len(), 3);

    let joined = store.join("Weekend Warriors").await.unwrap();
    assert!(joined.is_member("1"));
    assert_eq!(store.items()[1].members.len(), 3);

    store.remove_member("4", "1").await.unwrap();
    assert_eq!(store.items()[2].members.len(), 1);

    assert_eq!(api.calls(), calls);
}

#[tokio::test]
async fn test_offline_lookup_of_unknown_group() {
    let mut store = GroupStore::new(FakeApi::<Group>::unreachable());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    let error = store.fetch_by_id("mock-1").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::NotFound);
    assert_eq!(error.detail, "Group not found in offline mode");
    assert_eq!(store.error(), Some(&error));
    assert!(store.selected().is_none());
}

#[tokio::test]
async fn test_removing_organizer_is_rejected_before_any_request() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();
    let calls = api.calls();

    let error = store.remove_member("2", "3").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Validation);
    assert_eq!(api.calls(), calls);
    assert_eq!(store.items()[1].members.len(), 2);
}

#[tokio::test]
async fn test_organizer_of_unloaded_group_is_not_removed() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());

    let error = store.remove_member("4", "5").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Validation);
    assert_eq!(error.detail, "The organizer cannot be removed from the group");
    // only the lookup reached the server
    assert_eq!(api.calls(), 1);
    assert_eq!(api.items()[3].members, fallback::groups()[3].members);
    assert_eq!(store.error(), Some(&error));
}

#[tokio::test]
async fn test_remove_member_of_unknown_group_sends_no_removal() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());

    let error = store.remove_member("99", "1").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::NotFound);
    assert_eq!(api.calls(), 1);
    let members: Vec<_> = api.items().into_iter().map(|g| g.members).collect();
    let expected: Vec<_> = fallback::groups().into_iter().map(|g| g.members).collect();
    assert_eq!(members, expected);
}

#[tokio::test]
async fn test_online_remove_member_splices_collection_and_selection() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();
    store.fetch_by_id("1").await.unwrap();

    store.remove_member("1", "2").await.unwrap();

    assert_eq!(store.items()[0].members.len(), 1);
    assert_eq!(store.selected().map(|g| g.members.len()), Some(1));
    assert_eq!(api.items()[0].members.len(), 1);
}

#[tokio::test]
async fn test_online_create_uses_server_identity() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    let group = store.create(GroupDraft::new("Cycling Crew")).await.unwrap();

    assert!(group.id.starts_with("srv-"));
    assert_eq!(store.items().last(), Some(&group));
    assert_eq!(api.items().len(), 5);
}

#[tokio::test]
async fn test_application_error_surfaces_server_message() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    api.fail_with(ApiError::BadRequest("Group name already taken".to_string()));
    let error = store.create(GroupDraft::new("Running Club")).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Application);
    assert_eq!(error.detail, "Group name already taken");
    assert!(!store.is_offline());
    assert_eq!(store.items().len(), 4);
}

#[tokio::test]
async fn test_generic_message_when_server_is_silent() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    api.fail_with(ApiError::ServerError(String::new()));
    let error = store.delete("2").await.unwrap_err();

    assert_eq!(error.detail, "Failed to delete group");
    assert_eq!(store.items().len(), 4);
}

#[tokio::test]
async fn test_application_error_on_fetch_keeps_previous_collection() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    api.fail_with(ApiError::ServerError("Database unavailable".to_string()));
    let result = store.fetch_all(&GroupQuery::default()).await;

    assert_matches!(result, Err(ref e) if e.kind == ErrorKind::Application);
    assert_eq!(store.items().len(), 4);
    assert!(!store.is_offline());
}

#[tokio::test]
async fn test_recovers_online_after_successful_fetch() {
    let api = FakeApi::<Group>::unreachable();
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();
    assert!(store.is_offline());

    api.recover(fallback::groups()[..2].to_vec());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    assert!(!store.is_offline());
    assert!(store.error().is_none());
    assert_eq!(store.items().len(), 2);

    let calls = api.calls();
    store.delete("2").await.unwrap();
    assert_eq!(api.calls(), calls + 1);
}

#[tokio::test]
async fn test_online_search_and_membership_listing() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());

    store.search("run").await.unwrap();
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].name, "Running Club");

    store.fetch_member_of("2").await.unwrap();
    let names: Vec<_> = store.items().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Morning HIIT", "Weekend Warriors"]);

    let members = store.members("4").await.unwrap();
    assert_eq!(members.len(), 2);
}

#[tokio::test]
async fn test_join_replaces_group_by_name() {
    let api = FakeApi::with_items(fallback::groups());
    let mut store = GroupStore::new(api.clone());
    store.fetch_all(&GroupQuery::default()).await.unwrap();

    let group = store.join("Yoga Enthusiasts").await.unwrap();

    assert!(group.is_member("9"));
    assert_eq!(store.items()[1], group);
}
