use almanack_core::{
    ApiError, EditSession, Editable, EditorsPicks, Page, PageListItem, PageStatus, SaveIntent,
    ScheduledArticle,
};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn page_raw() -> Value {
    json!({
        "id": "12",
        "body": "Hello **world**",
        "file_path": "content/news/budget-deal.md",
        "url_path": {"String": "", "Valid": false},
        "created_at": "2023-02-01T10:00:00Z",
        "updated_at": "2023-02-02T10:00:00Z",
        "last_published": {"Valid": false, "Time": "0001-01-01T00:00:00Z"},
        "schedule_for": {"Valid": true, "Time": "2023-03-06T15:00:00Z"},
        "frontmatter": {
            "published": "2023-03-06T15:00:00Z",
            "arc-id": "ABC123",
            "kicker": "Budget",
            "title": "The Budget Deal",
            "authors": ["Angela Couloumbis"],
            "description": "Lawmakers agree",
            "topics": ["Budget"],
            "series": [],
            "image": "2023/03/capitol.jpeg",
            "image-credit": "Photog",
            "slug": "budget-deal",
            "no-index": false,
            "weight": 10
        }
    })
}

#[test]
fn page_reads_frontmatter() {
    let page = Page::from_raw(&page_raw());

    assert_eq!(page.kicker, "Budget");
    assert_eq!(page.authors, vec!["Angela Couloumbis"]);
    assert_eq!(page.status, PageStatus::Scheduled);
    assert_eq!(page.status.verbose(), "scheduled to be published");
    assert_eq!(
        page.arc_url(),
        "https://pmn.arcpublishing.com/composer/edit/ABC123/"
    );
    assert!(page.image_preview_url().starts_with("https://images.data.spotlightpa.org/insecure/"));
}

#[test]
fn page_link_rules() {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let mut page = Page::from_raw(&page_raw());
    assert_eq!(
        page.link(now),
        "https://www.spotlightpa.org/news/2023/03/budget-deal/"
    );

    page.update_only();
    assert_eq!(
        page.link(now),
        "https://www.spotlightpa.org/news/2024/05/budget-deal/"
    );

    page.file_path = "content/statecollege/about.md".to_string();
    page.slug.clear();
    assert_eq!(page.link(now), "https://www.spotlightpa.org/statecollege/about/");

    page.override_url = "/about-us/".to_string();
    assert_eq!(page.link(now), "https://www.spotlightpa.org/about-us/");

    page.url_path = "/news/2023/03/stored/".to_string();
    assert_eq!(page.link(now), "https://www.spotlightpa.org/news/2023/03/stored/");
}

#[test]
fn page_round_trips_through_serializer() {
    let page = Page::from_raw(&page_raw());
    let body = page.to_json();
    let again = Page::from_raw(&body);

    assert_eq!(again.to_json(), body);
    assert_eq!(again.title, page.title);
    assert_eq!(again.schedule_for, page.schedule_for);
    assert_eq!(again.published_at, page.published_at);
    assert_eq!(body["url_path"], json!(""));
    assert_eq!(body["set_last_published"], json!(false));
    assert_eq!(body["frontmatter"]["weight"], json!(10));
}

#[test]
fn page_schedule_serializes_nullable_time() {
    let mut page = Page::from_raw(&page_raw());
    page.update_only();
    assert_eq!(
        page.to_json()["schedule_for"],
        json!({"Valid": false, "Time": null})
    );

    let at = Utc.with_ymd_and_hms(2023, 4, 1, 9, 30, 0).unwrap();
    page.set_schedule(at);
    assert_eq!(
        page.to_json()["schedule_for"],
        json!({"Valid": true, "Time": "2023-04-01T09:30:00Z"})
    );
}

#[test]
fn page_publish_now_schedules_at_current_time() {
    let mut page = Page::from_raw(&page_raw());
    let before = Utc.with_ymd_and_hms(2023, 3, 6, 14, 59, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2023, 3, 6, 15, 1, 0).unwrap();
    assert!(!page.schedule_is_past(before));
    assert!(page.schedule_is_past(after));

    let now = Utc.with_ymd_and_hms(2023, 3, 7, 8, 0, 0).unwrap();
    page.publish_now(now);
    assert_eq!(page.schedule_for, Some(now));
    assert!(page.schedule_is_past(now));
    assert_eq!(
        page.to_json()["schedule_for"],
        json!({"Valid": true, "Time": "2023-03-07T08:00:00Z"})
    );

    page.update_only();
    assert!(!page.schedule_is_past(now));
}

#[test]
fn page_derives_slug_from_title() {
    let mut page = Page::from_raw(&page_raw());
    page.title = "The Best Bill in PA's History".to_string();
    page.derive_slug();
    assert_eq!(page.slug, "best-bill-in-pennsylvania-history");
}

#[test]
fn page_validation() {
    let mut page = Page::from_raw(&page_raw());
    assert_eq!(page.validate(SaveIntent::Schedule), Ok(()));

    page.image.clear();
    assert_eq!(page.validate(SaveIntent::Update), Ok(()));
    assert!(matches!(
        page.validate(SaveIntent::Schedule),
        Err(ApiError::Validation { ref field, .. }) if field == "image"
    ));

    page.kicker = "  ".to_string();
    assert!(matches!(
        page.validate(SaveIntent::Update),
        Err(ApiError::Validation { ref field, .. }) if field == "kicker"
    ));
}

#[test]
fn session_blocks_invalid_save_and_keeps_edits() {
    let mut session: EditSession<Page> = EditSession::new(&page_raw());
    session.model_mut().slug.clear();
    assert!(session.is_dirty());

    let err = session.begin_save(SaveIntent::Update).unwrap_err();
    assert_eq!(session.save_error(), Some(&err));
    assert_eq!(session.model().slug, "");

    session.reset();
    assert_eq!(session.model().slug, "budget-deal");
    assert_eq!(session.save_error(), None);
    assert!(!session.is_dirty());
}

#[test]
fn session_adopts_canonical_response() {
    let mut session: EditSession<Page> = EditSession::new(&page_raw());
    session.model_mut().title = "New title".to_string();
    let body = session.begin_save(SaveIntent::Update).unwrap();
    assert_eq!(body["frontmatter"]["title"], json!("New title"));

    let mut canonical = page_raw();
    canonical["frontmatter"]["title"] = json!("New title");
    canonical["frontmatter"]["slug"] = json!("budget-deal-2");
    session.finish_save(Ok(canonical)).unwrap();

    assert_eq!(session.model().slug, "budget-deal-2");
    assert!(!session.is_dirty());
    session.reset();
    assert_eq!(session.model().title, "New title");
}

#[test]
fn session_keeps_edits_when_server_rejects() {
    let mut session: EditSession<Page> = EditSession::new(&page_raw());
    session.model_mut().title = "Unsaved".to_string();
    let rejected = ApiError::UnexpectedResponse {
        name: "409 Conflict".to_string(),
        details: Default::default(),
    };

    assert_eq!(session.finish_save(Err(rejected.clone())), Err(rejected.clone()));
    assert_eq!(session.model().title, "Unsaved");
    assert_eq!(session.save_error(), Some(&rejected));
}

fn scheduled_raw() -> Value {
    json!({
        "ID": 3,
        "ArcID": "ABC123",
        "Body": "Text",
        "Blurb": "",
        "Hed": "Budget deal reached",
        "ImageCaption": "",
        "ImageCredit": "",
        "ImageURL": "",
        "LinkTitle": "",
        "Slug": "budget-deal",
        "Subhead": "",
        "Summary": "",
        "Authors": ["Angela Couloumbis"],
        "ScheduleFor": null,
        "LastArcSync": "2023-03-01T08:00:00Z",
        "PubDate": ""
    })
}

#[test]
fn scheduled_article_round_trips() {
    let article = ScheduledArticle::from_raw(&scheduled_raw());
    assert_eq!(article.to_string(), "Scheduled Article 3");
    let body = article.to_json();

    assert_eq!(ScheduledArticle::from_raw(&body), article);
    assert_eq!(body["LastArcSync"], json!("2023-03-01T08:00:00Z"));
    assert_eq!(body["ScheduleFor"], Value::Null);
    assert_eq!(
        article.last_arc_sync(),
        Some(Utc.with_ymd_and_hms(2023, 3, 1, 8, 0, 0).unwrap())
    );
    assert_eq!(article.pub_date(), None);
}

#[test]
fn scheduled_article_needs_image_to_schedule() {
    let mut session: EditSession<ScheduledArticle> = EditSession::new(&scheduled_raw());
    assert!(session.begin_save(SaveIntent::Update).is_ok());
    assert!(session.begin_save(SaveIntent::Schedule).is_err());

    session.model_mut().image_url = "2023/03/capitol.jpeg".to_string();
    let at = Utc.with_ymd_and_hms(2023, 3, 6, 15, 0, 0).unwrap();
    session.model_mut().set_schedule_for(Some(at));
    let body = session.begin_save(SaveIntent::Schedule).unwrap();
    assert_eq!(body["ScheduleFor"], json!("2023-03-06T15:00:00Z"));
}

#[test]
fn page_list_items() {
    let payload = json!({"pages": [
        {"id": "1", "title": "A", "url_path": "/news/2023/03/a/", "last_published": {"Valid": true, "Time": "2023-03-06T15:00:00Z"}},
        {"id": "2", "title": "B", "schedule_for": {"Valid": true, "Time": "2023-04-06T15:00:00Z"}},
        {"id": "3", "title": "C"}
    ]});
    let items = PageListItem::list_from(&payload);
    let statuses: Vec<&str> = items.iter().map(|p| p.status().as_str()).collect();

    assert_eq!(statuses, vec!["pub", "sked", "none"]);
    assert_eq!(items[0].link(), "https://www.spotlightpa.org/news/2023/03/a/");
    assert!(PageListItem::list_from(&json!({})).is_empty());
}

#[test]
fn editors_picks_clone_and_serialize() {
    let payload = json!({"configs": [{
        "schedule_for": "2023-03-01T00:00:00Z",
        "published_at": "2023-03-01T00:00:05Z",
        "data": {
            "featuredStories": ["/news/a/"],
            "subfeatures": ["/news/b/", "/news/c/"],
            "topSlots": [],
            "topper": []
        }
    }]});
    let picks = EditorsPicks::list_from(&payload);
    assert_eq!(picks.len(), 1);
    assert!(picks[0].is_current);

    let next_at = Utc.with_ymd_and_hms(2023, 3, 8, 0, 0, 0).unwrap();
    let next = picks[0].clone_for(Some(next_at));
    assert!(!next.is_current);
    assert_eq!(next.subfeatures, picks[0].subfeatures);

    let body = EditorsPicks::configs_payload(&[picks[0].clone(), next]);
    assert_eq!(body["configs"][1]["schedule_for"], json!("2023-03-08T00:00:00Z"));
    assert_eq!(
        body["configs"][0]["data"]["featuredStories"],
        json!(["/news/a/"])
    );
}
