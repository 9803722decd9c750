mod common;

use common::{project, session, FakeApi};
use folio_core::codec::{self, DecodeOutcome};
use folio_core::layout::LayoutKind;
use folio_core::model::contact::ContactMessage;
use folio_core::model::dates::parse_date;
use folio_core::model::portfolio::{Achievement, Portfolio, PublicUser};
use folio_core::model::post::Post;
use folio_core::model::rich_text::{Block, BlockType, InlineStyle, RichDocument};
use folio_core::service::account_service::{AccountForm, AccountService, AccountUpdated};
use folio_core::service::blog_service::{BlogService, PostForm};
use folio_core::service::contact_service::ContactService;
use folio_core::service::portfolio_editor::{
    AchievementForm, PortfolioEditor, PortfolioForm, ProjectForm,
};
use folio_core::service::ServiceError;

fn rich_description() -> RichDocument {
    RichDocument::new().with_block(
        Block::with_key("k", BlockType::Unstyled, "Fast and small").styled(InlineStyle::Bold, 0, 4),
    )
}

#[tokio::test]
async fn editor_calls_without_session_send_nothing() {
    let api = FakeApi::default();
    let editor = PortfolioEditor::new(api.clone());
    let form = ProjectForm {
        title: "Folio".to_string(),
        ..ProjectForm::default()
    };

    assert!(matches!(
        editor.create_project(None, &form).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        editor.delete_project(None, 1).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        editor
            .update_portfolio(None, &PortfolioForm::default())
            .await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        editor.upload_image(None, "a.png", vec![1, 2, 3]).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn project_description_is_sent_as_encoded_document() {
    let api = FakeApi::default();
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");
    let form = ProjectForm {
        title: " Folio ".to_string(),
        description: rich_description(),
        technologies: "Rust, SQLite".to_string(),
        featured: true,
        ..ProjectForm::default()
    };

    let created = editor.create_project(Some(&session), &form).await.unwrap();
    assert_eq!(created.id, 42);

    let draft = api.state.lock().unwrap().project_drafts[0].clone();
    assert_eq!(draft.title, "Folio");
    assert!(draft.featured);
    assert_eq!(
        codec::decode(&draft.description),
        DecodeOutcome::Parsed(rich_description())
    );
    assert_eq!(
        codec::render(Some(draft.description.as_str())),
        "<p><strong>Fast</strong> and small</p>"
    );
}

#[tokio::test]
async fn blank_titles_fail_validation_before_request() {
    let api = FakeApi::default();
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");

    let err = editor
        .create_achievement(Some(&session), &AchievementForm::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation { field: "title", .. }));

    let err = editor
        .upload_image(Some(&session), "empty.png", Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation { field: "image", .. }));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn portfolio_update_and_upload_reach_the_api() {
    let api = FakeApi::default();
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");
    let form = PortfolioForm {
        title: "Ada".to_string(),
        about_me: RichDocument::paragraph("Hello"),
        layout: LayoutKind::Compact,
        ..PortfolioForm::default()
    };

    let updated = editor.update_portfolio(Some(&session), &form).await.unwrap();
    assert_eq!(updated.layout, "compact");
    assert_eq!(codec::plain_text(&updated.about_me), "Hello");

    let url = editor
        .upload_image(Some(&session), " shot.png ", vec![0x89, 0x50])
        .await
        .unwrap();
    assert_eq!(url, "/uploads/shot.png");
    assert_eq!(
        api.calls(),
        vec!["PUT /api/auth/portfolio", "POST /api/auth/upload shot.png"]
    );
}

#[tokio::test]
async fn not_found_deletes_map_to_service_error() {
    let api = FakeApi::failing(404);
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");

    let err = editor
        .delete_achievement(Some(&session), 77)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: "achievement",
            id: 77
        }
    ));
}

#[tokio::test]
async fn blog_lists_previews_and_renders_posts() {
    let api = FakeApi::default();
    {
        let mut state = api.state.lock().unwrap();
        state.posts = vec![
            Post {
                id: 1,
                title: "Rich".to_string(),
                content: codec::encode(&RichDocument::paragraph("Rich <body>")),
                ..Post::default()
            },
            Post {
                id: 2,
                title: "Legacy".to_string(),
                content: "old   plain text".to_string(),
                ..Post::default()
            },
        ];
    }
    let blog = BlogService::new(api.clone());

    let summaries = blog.list().await.unwrap();
    assert_eq!(summaries[0].preview.as_deref(), Some("Rich <body>"));
    assert_eq!(summaries[1].preview.as_deref(), Some("old plain text"));

    let rendered = blog.get(1).await.unwrap();
    assert_eq!(rendered.html, "<p>Rich &lt;body&gt;</p>");

    assert!(matches!(
        blog.get(99).await,
        Err(ServiceError::NotFound { kind: "post", id: 99 })
    ));
}

#[tokio::test]
async fn blog_authoring_requires_session_and_encodes_content() {
    let api = FakeApi::default();
    let blog = BlogService::new(api.clone());
    let form = PostForm {
        title: "Hello".to_string(),
        content: RichDocument::paragraph("First post"),
    };

    assert!(matches!(
        blog.create(None, &form).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(api.calls().is_empty());

    let session = session(1, "ada");
    let post = blog.create(Some(&session), &form).await.unwrap();
    assert_eq!(post.id, 11);
    let draft = api.state.lock().unwrap().post_drafts[0].clone();
    assert_eq!(codec::plain_text(&draft.content), "First post");

    blog.delete(Some(&session), 11).await.unwrap();
    assert_eq!(
        api.calls(),
        vec!["POST /api/auth/posts", "DELETE /api/auth/posts/11"]
    );
}

#[tokio::test]
async fn contact_validates_then_sends_trimmed_message() {
    let api = FakeApi::default();
    let contact = ContactService::new(api.clone());

    let invalid = ContactMessage {
        name: "Ada".to_string(),
        email: "not-an-email".to_string(),
        subject: "Hi".to_string(),
        message: "Hello".to_string(),
    };
    assert!(matches!(
        contact.send(&invalid).await,
        Err(ServiceError::Validation { field: "email", .. })
    ));
    assert!(api.calls().is_empty());

    let valid = ContactMessage {
        email: " ada@example.com ".to_string(),
        ..invalid
    };
    contact.send(&valid).await.unwrap();
    let sent = api.state.lock().unwrap().contact_messages[0].clone();
    assert_eq!(sent.email, "ada@example.com");
    assert_eq!(api.calls(), vec!["POST /api/contact"]);
}

fn owned_portfolio() -> Portfolio {
    let mut folio = project(7, "Folio", "Rust", true);
    folio.description = codec::encode(&rich_description());
    folio.link = "https://folio.example".to_string();
    Portfolio {
        title: "Ada's work".to_string(),
        description: "Tools".to_string(),
        about_me: codec::encode(&RichDocument::paragraph("About Ada")),
        contact_info: "ada@example.com".to_string(),
        layout: "grid".to_string(),
        projects: vec![folio],
        achievements: vec![Achievement {
            id: 5,
            title: "Award".to_string(),
            description: "legacy text".to_string(),
            date: parse_date("2024-03-01"),
        }],
        owner: Some(PublicUser {
            username: "ada".to_string(),
            bio: "Engineer".to_string(),
            social_media_links: "https://github.com/ada".to_string(),
            profile_picture_url: "/uploads/ada.png".to_string(),
        }),
        ..Portfolio::default()
    }
}

#[tokio::test]
async fn project_update_keeps_untouched_fields_from_current_record() {
    let api = FakeApi::with_portfolio(owned_portfolio());
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");

    let mut form = editor.project_form(Some(&session), 7).await.unwrap();
    form.title = "Folio 2".to_string();
    let updated = editor
        .update_project(Some(&session), 7, &form)
        .await
        .unwrap();

    assert_eq!(updated.title, "Folio 2");
    let draft = api.state.lock().unwrap().project_drafts[0].clone();
    assert_eq!(draft.description, codec::encode(&rich_description()));
    assert_eq!(draft.link, "https://folio.example");
    assert!(draft.featured);
    assert_eq!(
        api.calls(),
        vec![
            "GET /api/portfolio/ada auth=true",
            "PUT /api/auth/portfolio/projects/7"
        ]
    );
}

#[tokio::test]
async fn achievement_update_keeps_date_and_legacy_description() {
    let api = FakeApi::with_portfolio(owned_portfolio());
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");

    let mut form = editor.achievement_form(Some(&session), 5).await.unwrap();
    assert_eq!(form.description.plain_text(), "legacy text");
    form.title = "Big award".to_string();
    let updated = editor
        .update_achievement(Some(&session), 5, &form)
        .await
        .unwrap();

    assert_eq!(updated.id, 5);
    let draft = api.state.lock().unwrap().achievement_drafts[0].clone();
    assert_eq!(draft.title, "Big award");
    assert_eq!(draft.date, parse_date("2024-03-01"));
    assert_eq!(codec::plain_text(&draft.description), "legacy text");
}

#[tokio::test]
async fn update_calls_without_session_send_nothing() {
    let api = FakeApi::with_portfolio(owned_portfolio());
    let editor = PortfolioEditor::new(api.clone());
    let project = ProjectForm {
        title: "Folio".to_string(),
        ..ProjectForm::default()
    };
    let achievement = AchievementForm {
        title: "Award".to_string(),
        ..AchievementForm::default()
    };

    assert!(matches!(
        editor.update_project(None, 7, &project).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        editor.update_achievement(None, 5, &achievement).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        editor.project_form(None, 7).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        editor.portfolio_form(None).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn not_found_updates_map_to_service_error() {
    let api = FakeApi::failing(404);
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");
    let project = ProjectForm {
        title: "Folio".to_string(),
        ..ProjectForm::default()
    };
    let achievement = AchievementForm {
        title: "Award".to_string(),
        ..AchievementForm::default()
    };

    assert!(matches!(
        editor.update_project(Some(&session), 9, &project).await,
        Err(ServiceError::NotFound {
            kind: "project",
            id: 9
        })
    ));
    assert!(matches!(
        editor
            .update_achievement(Some(&session), 9, &achievement)
            .await,
        Err(ServiceError::NotFound {
            kind: "achievement",
            id: 9
        })
    ));

    let loaded = PortfolioEditor::new(FakeApi::with_portfolio(owned_portfolio()));
    assert!(matches!(
        loaded.project_form(Some(&session), 99).await,
        Err(ServiceError::NotFound {
            kind: "project",
            id: 99
        })
    ));
}

#[tokio::test]
async fn portfolio_form_prefills_from_current_portfolio() {
    let api = FakeApi::with_portfolio(owned_portfolio());
    let editor = PortfolioEditor::new(api.clone());
    let session = session(1, "ada");

    let mut form = editor.portfolio_form(Some(&session)).await.unwrap();
    assert_eq!(form.layout, LayoutKind::Grid);
    form.title = "New title".to_string();
    let update = form.to_update();

    assert_eq!(update.title, "New title");
    assert_eq!(update.description, "Tools");
    assert_eq!(update.contact_info, "ada@example.com");
    assert_eq!(codec::plain_text(&update.about_me), "About Ada");

    let fresh = PortfolioEditor::new(FakeApi::default());
    assert_eq!(
        fresh.portfolio_form(Some(&session)).await.unwrap(),
        PortfolioForm::default()
    );
}

#[tokio::test]
async fn account_update_sends_full_card() {
    let api = FakeApi::default();
    let account = AccountService::new(api.clone());
    let session = session(1, "ada");
    let owner = owned_portfolio().owner.unwrap();
    let mut form = AccountForm::from_public_user(&owner);
    form.email = "ada@example.com".to_string();
    form.bio = "Engineer and writer".to_string();

    let outcome = account.update_profile(Some(&session), &form).await.unwrap();

    assert_eq!(
        outcome,
        AccountUpdated {
            username_changed: false
        }
    );
    let sent = api.state.lock().unwrap().user_updates[0].clone();
    assert_eq!(sent.username, "ada");
    assert_eq!(sent.social_media_links, "https://github.com/ada");
    assert_eq!(sent.profile_picture_url, "/uploads/ada.png");
    assert_eq!(api.calls(), vec!["PUT /api/auth/user"]);

    form.username = "lovelace".to_string();
    let renamed = account.update_profile(Some(&session), &form).await.unwrap();
    assert!(renamed.username_changed);
}

#[tokio::test]
async fn account_calls_validate_before_any_request() {
    let api = FakeApi::default();
    let account = AccountService::new(api.clone());
    let session = session(1, "ada");
    let form = AccountForm {
        username: "ada".to_string(),
        email: "nope".to_string(),
        ..AccountForm::default()
    };

    assert!(matches!(
        account.update_profile(None, &form).await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        account.update_profile(Some(&session), &form).await,
        Err(ServiceError::Validation { field: "email", .. })
    ));
    assert!(matches!(
        account.change_password(None, "old", "new").await,
        Err(ServiceError::NotAuthenticated)
    ));
    assert!(matches!(
        account.change_password(Some(&session), "same", "same").await,
        Err(ServiceError::Validation {
            field: "new_password",
            ..
        })
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn password_change_maps_rejected_old_password() {
    let api = FakeApi::default();
    api.state.lock().unwrap().current_password = Some("correct horse".to_string());
    let account = AccountService::new(api.clone());
    let session = session(1, "ada");

    assert!(matches!(
        account
            .change_password(Some(&session), "wrong", "battery staple")
            .await,
        Err(ServiceError::Validation {
            field: "old_password",
            ..
        })
    ));
    account
        .change_password(Some(&session), "correct horse", "battery staple")
        .await
        .unwrap();
    assert_eq!(
        api.state.lock().unwrap().current_password.as_deref(),
        Some("battery staple")
    );
    assert_eq!(api.calls().len(), 2);
}
