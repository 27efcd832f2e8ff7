use std::sync::Arc;
use std::time::Duration;

use shiptalk::core::action::{Action, Effect, update};
use shiptalk::core::assistant::simulate_lookup;
use shiptalk::core::camera::{PreviewState, SimulatedCamera, acquire};
use shiptalk::core::clock::Clock;
use shiptalk::core::feed::{Tab, TabView, VoteDirection};
use shiptalk::core::model::Category;
use shiptalk::core::sidebar::DialogTarget;
use shiptalk::core::state::App;

// ============================================================================
// Helper Functions
// ============================================================================

struct FrozenClock;

impl Clock for FrozenClock {
    fn now_millis(&self) -> i64 {
        1_687_600_000_000
    }

    fn locale_date(&self) -> String {
        "6/24/2023".to_string()
    }
}

fn app() -> App {
    App::new(Arc::new(FrozenClock))
}

fn titles(app: &App, tab: Tab) -> Vec<String> {
    match app.forum.tab_view(tab) {
        TabView::Posts(indices) => indices
            .into_iter()
            .map(|i| app.forum.post(i).unwrap().title.clone())
            .collect(),
        TabView::Live => Vec::new(),
    }
}

// ============================================================================
// Feed
// ============================================================================

#[test]
fn test_category_filter_narrows_to_one_post() {
    let mut app = app();
    update(&mut app, Action::SelectCategory(Category::EcoPackaging));
    assert_eq!(
        titles(&app, Tab::All),
        vec!["Eco-friendly packaging solutions for e-commerce"]
    );

    update(&mut app, Action::ResetFilter);
    assert_eq!(titles(&app, Tab::All).len(), 6);
}

#[test]
fn test_hot_tab_excludes_posts_at_or_below_threshold() {
    let app = app();
    let hot = titles(&app, Tab::Hot);
    assert_eq!(hot.len(), 5);
    assert!(!hot.contains(&"Best practices for reducing shipping damages".to_string()));
}

#[test]
fn test_new_tab_orders_by_first_comment_date() {
    let app = app();
    let newest = titles(&app, Tab::New);
    assert_eq!(newest[0], "Improving delivery speed without breaking the bank");
    assert_eq!(newest[5], "New USPS rates impact on small businesses");
    // Canonical order untouched
    assert_eq!(
        titles(&app, Tab::All)[0],
        "UPS vs FedEx for international B2B shipments"
    );
}

#[test]
fn test_vote_up_then_down_restores_tally() {
    let mut app = app();
    for direction in [VoteDirection::Up, VoteDirection::Down] {
        update(&mut app, Action::Vote { post: 2, direction });
    }
    assert_eq!(app.forum.post(2).unwrap().upvotes, 31);
}

#[test]
fn test_votes_survive_filter_changes() {
    let mut app = app();
    update(
        &mut app,
        Action::Vote {
            post: 3,
            direction: VoteDirection::Up,
        },
    );
    update(&mut app, Action::SelectCategory(Category::Packaging));
    update(&mut app, Action::ResetFilter);
    assert_eq!(app.forum.post(3).unwrap().upvotes, 43);
}

#[test]
fn test_comment_appends_with_defaults_and_clears_draft() {
    let mut app = app();
    update(
        &mut app,
        Action::EditDraft {
            post: 1,
            text: "Air pillows work well".into(),
        },
    );
    update(&mut app, Action::SubmitComment { post: 1 });

    let post = app.forum.post(1).unwrap();
    let comment = post.comments.last().unwrap();
    assert_eq!(post.comments.len(), 3);
    assert_eq!(comment.author, "Anonymous User");
    assert_eq!(comment.date, "6/24/2023");
    assert_eq!(comment.content, "Air pillows work well");
    assert!(app.forum.card(1).unwrap().draft.is_empty());
}

// ============================================================================
// Chat and assistant
// ============================================================================

#[test]
fn test_chat_messages_append_in_order() {
    let mut app = app();
    update(&mut app, Action::SendChat("first".into()));
    update(&mut app, Action::SendChat("second".into()));
    let messages = app.chat.messages();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[3].content, "first");
    assert_eq!(messages[4].content, "second");
    assert!(messages[4].id > messages[3].id);
}

#[tokio::test(start_paused = true)]
async fn test_assistant_answers_after_delay() {
    let mut app = app();
    update(&mut app, Action::EditQuery("How do I cut costs?".into()));
    let Effect::SpawnAssistantLookup { request, delay } = update(&mut app, Action::AskAssistant)
    else {
        panic!("expected a lookup");
    };
    assert_eq!(delay, Duration::from_millis(2000));

    let start = tokio::time::Instant::now();
    let answer = simulate_lookup(delay).await;
    assert!(start.elapsed() >= Duration::from_millis(2000));

    update(&mut app, Action::AssistantAnswered { request, answer });
    assert!(!app.assistant.is_pending());
    assert_eq!(app.assistant.answer().unwrap().references.len(), 5);
}

// ============================================================================
// Sidebar and camera
// ============================================================================

#[test]
fn test_only_one_dialog_open_at_a_time() {
    let mut app = app();
    update(&mut app, Action::OpenDialog(DialogTarget::JoinGroup(0)));
    update(&mut app, Action::OpenDialog(DialogTarget::Rsvp(1)));
    assert_eq!(app.open_dialog(), Some(DialogTarget::Rsvp(1)));
    assert!(!app.sidebar.groups[0].dialog.is_open());

    update(&mut app, Action::ConfirmDialog);
    assert!(app.sidebar.events[1].rsvp);
    assert_eq!(app.open_dialog(), None);
}

#[tokio::test]
async fn test_camera_released_when_dialog_closes() {
    let camera = SimulatedCamera::new(true, Duration::ZERO);
    let mut app = app();
    update(&mut app, Action::OpenDialog(DialogTarget::Expert(0)));
    let Effect::RequestCamera(ticket) = update(&mut app, Action::ToggleCameraPreview) else {
        panic!("expected a camera request");
    };

    let result = acquire(&camera).await;
    update(&mut app, Action::CameraResolved { ticket, result });
    assert!(matches!(app.sidebar.camera.state(), PreviewState::Live(_)));
    assert_eq!(camera.live_tracks(), 1);

    update(&mut app, Action::DismissDialog);
    assert!(matches!(app.sidebar.camera.state(), PreviewState::Off));
    assert_eq!(camera.live_tracks(), 0);
}
