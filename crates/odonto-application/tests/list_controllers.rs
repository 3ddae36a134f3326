mod common;

use chrono::{NaiveDate, NaiveTime};
use common::*;
use odonto_application::Settled;
use odonto_core::OdontoError;
use odonto_core::appointment::{AppointmentInput, AppointmentStatus, AppointmentTab};
use odonto_core::client::ClientInput;
use odonto_core::resource::{Resource, Searchable, matches_query};
use odonto_core::treatment::TreatmentInput;
use odonto_core::user::{Role, UserInput};
use std::sync::atomic::Ordering;

fn new_client() -> ClientInput {
    ClientInput {
        name: "Paula Reis".to_string(),
        email: "paula@mail.test".to_string(),
        phone: "555-0199".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_merge_create_appends_backend_entity() {
    let h = signed_in("costa@clinic.test").await;
    h.ctx.clients.fetch_all().await.unwrap();
    let before = h.ctx.clients.len().await;

    let created = h
        .ctx
        .clients
        .create(&new_client())
        .await
        .unwrap()
        .applied()
        .unwrap();

    assert_eq!(created.id, "c-3");
    assert_eq!(h.ctx.clients.len().await, before + 1);
    assert_eq!(h.ctx.clients.find("c-3").await.unwrap().name, "Paula Reis");
    // Merge never re-reads the collection
    assert_eq!(h.clients.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_merge_update_replaces_in_place() {
    let h = signed_in("costa@clinic.test").await;
    h.ctx.clients.fetch_all().await.unwrap();

    let input = ClientInput {
        name: "Maria S. Lima".to_string(),
        email: "maria@mail.test".to_string(),
        phone: "555-0101".to_string(),
        ..Default::default()
    };
    h.ctx.clients.update("c-1", &input).await.unwrap();

    let items = h.ctx.clients.items().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, "c-1");
    assert_eq!(items[0].name, "Maria S. Lima");
}

#[tokio::test]
async fn test_refetch_create_yields_backend_collection() {
    let h = signed_in("costa@clinic.test").await;
    h.ctx.appointments.fetch_all().await.unwrap();

    // Another session books an appointment meanwhile
    h.appointments.insert_server_side(appointment(
        "a-90",
        "c-2",
        "2031-03-03",
        AppointmentStatus::Scheduled,
    ));

    let input = AppointmentInput {
        client_id: "c-1".to_string(),
        professional_id: "p-1".to_string(),
        treatment_id: "t-2".to_string(),
        date: NaiveDate::from_ymd_opt(2031, 4, 1).unwrap(),
        time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        status: AppointmentStatus::Scheduled,
        notes: None,
    };
    let created = h
        .ctx
        .appointments
        .create(&input)
        .await
        .unwrap()
        .applied()
        .unwrap();

    let local: Vec<String> = h
        .ctx
        .appointments
        .items()
        .await
        .iter()
        .map(|a| a.id().to_string())
        .collect();
    let server: Vec<String> = h
        .appointments
        .server_items()
        .iter()
        .map(|a| a.id().to_string())
        .collect();

    assert_eq!(local, server);
    assert!(local.contains(&created.id));
    assert!(local.contains(&"a-90".to_string()));
}

#[tokio::test]
async fn test_delete_one_of_three_appointments() {
    let h = signed_in("costa@clinic.test").await;
    assert_eq!(
        h.ctx.appointments.fetch_all().await.unwrap(),
        Settled::Applied(3)
    );

    h.ctx.appointments.delete("a-2").await.unwrap();

    let items = h.ctx.appointments.items().await;
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|a| a.id != "a-2"));
}

#[tokio::test]
async fn test_conflicting_delete_leaves_collection_unchanged() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.treatments.fetch_all().await.unwrap();
    let before = h.ctx.treatments.items().await;
    h.treatments.mark_referenced("t-1");

    let err = h.ctx.treatments.delete("t-1").await.unwrap_err();

    assert!(err.is_conflict());
    assert_ne!(
        err.user_message(),
        OdontoError::network("down").user_message()
    );
    assert_eq!(h.ctx.treatments.items().await, before);
}

#[tokio::test]
async fn test_failed_treatment_fetch_keeps_collection() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.treatments.fetch_all().await.unwrap();
    let before = h.ctx.treatments.items().await;

    h.treatments.fail_next(OdontoError::network("connection reset"));
    let err = h.ctx.treatments.fetch_all().await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(h.ctx.treatments.items().await, before);
}

#[tokio::test]
async fn test_backend_error_on_create_keeps_collection() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.treatments.fetch_all().await.unwrap();
    h.treatments.fail_next(OdontoError::backend(500, "boom"));

    let input = TreatmentInput {
        name: "Implant".to_string(),
        description: String::new(),
        duration: 90,
        price: 2000.0,
    };
    let err = h.ctx.treatments.create(&input).await.unwrap_err();

    assert!(matches!(err, OdontoError::Backend { status: 500, .. }));
    assert_eq!(h.ctx.treatments.len().await, 2);
}

#[tokio::test]
async fn test_filter_is_order_preserving_subset() {
    let h = signed_in("costa@clinic.test").await;
    h.ctx.clients.fetch_all().await.unwrap();
    let all = h.ctx.clients.items().await;

    for query in ["", "  ", "MARIA", "555-01", "mail.test", "zzz", "ã"] {
        let filtered = h.ctx.clients.filtered(query).await;

        assert!(filtered.iter().all(|c| matches_query(c, query)));
        let positions: Vec<usize> = filtered
            .iter()
            .map(|c| all.iter().position(|a| a.id == c.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "order for {:?}", query);
    }

    assert_eq!(h.ctx.clients.filtered("").await, all);
    assert_eq!(h.ctx.clients.filtered("maria").await.len(), 1);
    assert!(h.ctx.clients.filtered("zzz").await.is_empty());
}

#[tokio::test]
async fn test_appointment_filter_uses_display_names() {
    let h = signed_in("costa@clinic.test").await;
    h.ctx.appointments.fetch_all().await.unwrap();

    let hits = h.ctx.appointments.filtered("client c-2").await;
    assert_eq!(hits.len(), 1);
    assert!(hits[0].search_fields().contains(&"Client c-2"));
    assert_eq!(h.ctx.appointments.filtered("costa").await.len(), 3);
}

#[tokio::test]
async fn test_appointment_tabs() {
    let h = signed_in("carla@clinic.test").await;
    h.ctx.appointments.fetch_all().await.unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    let upcoming = h.ctx.appointments.in_tab(AppointmentTab::Upcoming, today, "").await;
    let past = h.ctx.appointments.in_tab(AppointmentTab::Past, today, "").await;
    let all = h.ctx.appointments.in_tab(AppointmentTab::All, today, "").await;

    assert_eq!(
        upcoming.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
        vec!["a-1", "a-3"]
    );
    assert_eq!(past.len(), 1);
    assert_eq!(past[0].id, "a-2");
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn test_second_mutation_while_busy_is_rejected() {
    let h = signed_in("costa@clinic.test").await;
    h.ctx.clients.fetch_all().await.unwrap();
    let hold = h.clients.hold_next();

    let ctx_clients = h.ctx.clients.clone();
    let first = tokio::spawn(async move { ctx_clients.create(&new_client()).await });

    hold.entered.notified().await;
    assert!(h.ctx.clients.is_busy());
    let err = h.ctx.clients.delete("c-1").await.unwrap_err();
    assert!(err.is_busy());

    hold.release.notify_one();
    let created = first.await.unwrap().unwrap();
    assert!(matches!(created, Settled::Applied(_)));
    assert!(!h.ctx.clients.is_busy());
    assert_eq!(h.ctx.clients.len().await, 3);
}

#[tokio::test]
async fn test_response_after_logout_is_discarded() {
    let h = signed_in("costa@clinic.test").await;
    let hold = h.clients.hold_next();

    let ctx_clients = h.ctx.clients.clone();
    let fetch = tokio::spawn(async move { ctx_clients.fetch_all().await });

    hold.entered.notified().await;
    h.ctx.session.logout().await.unwrap();
    hold.release.notify_one();

    assert_eq!(fetch.await.unwrap().unwrap(), Settled::Discarded);
    assert!(h.ctx.clients.is_empty().await);
}

#[tokio::test]
async fn test_unauthorized_response_forces_logout() {
    let h = signed_in("costa@clinic.test").await;
    h.ctx.clients.fetch_all().await.unwrap();
    h.auth.revoke_all();
    h.clients.fail_next(OdontoError::Unauthorized);

    let err = h.ctx.clients.fetch_all().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!h.ctx.session.is_authenticated().await);
    assert!(h.store.is_empty());
    assert!(h.ctx.clients.is_empty().await);
}

#[tokio::test]
async fn test_logout_empties_every_collection() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.clients.fetch_all().await.unwrap();
    h.ctx.appointments.fetch_all().await.unwrap();
    h.ctx.users.fetch_all().await.unwrap();

    h.ctx.session.logout().await.unwrap();

    assert!(h.ctx.clients.items().await.is_empty());
    assert!(h.ctx.clients.find("c-1").await.is_none());
    assert!(h.ctx.clients.filtered("").await.is_empty());
    assert!(
        h.ctx
            .appointments
            .in_tab(AppointmentTab::All, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), "")
            .await
            .is_empty()
    );
    assert!(h.ctx.users.visible("").await.is_empty());

    let err = h.ctx.clients.fetch_all().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(h.clients.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_new_session_starts_from_empty_collections() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.clients.fetch_all().await.unwrap();
    h.ctx.session.logout().await.unwrap();
    h.ctx.session.login("costa@clinic.test", PASSWORD).await.unwrap();

    assert!(h.ctx.clients.is_empty().await);

    let created = h.ctx.clients.create(&new_client()).await.unwrap().applied().unwrap();
    let ids: Vec<String> = h.ctx.clients.items().await.into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![created.id]);

    h.ctx.clients.fetch_all().await.unwrap();
    assert_eq!(h.ctx.clients.len().await, 3);
}

#[tokio::test]
async fn test_missing_capability_never_reaches_backend() {
    let h = signed_in("carla@clinic.test").await;

    let err = h.ctx.clients.fetch_all().await.unwrap_err();
    assert!(err.is_forbidden());

    let err = h
        .ctx
        .treatments
        .delete("t-1")
        .await
        .unwrap_err();
    assert!(err.is_forbidden());

    assert_eq!(h.clients.list_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.treatments.mutation_calls.load(Ordering::SeqCst), 0);
    assert!(h.ctx.session.is_authenticated().await);
}

#[tokio::test]
async fn test_user_directory_shows_staff_only() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.users.fetch_all().await.unwrap();

    let visible = h.ctx.users.visible("").await;
    assert!(visible.iter().all(|u| u.role != Role::Client));
    assert_eq!(visible.len(), 3);
    assert_eq!(h.ctx.users.visible("costa").await.len(), 1);
}

#[tokio::test]
async fn test_user_directory_delete_guards() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.users.fetch_all().await.unwrap();

    let own = h.ctx.users.delete("u-1").await.unwrap_err();
    assert!(own.is_validation());

    let protected = h.ctx.users.delete("u-4").await.unwrap_err();
    assert!(protected.is_validation());
    assert_eq!(h.users.mutation_calls.load(Ordering::SeqCst), 0);

    h.ctx.users.delete("u-2").await.unwrap();
    assert!(h.ctx.users.controller().find("u-2").await.is_none());
    assert_eq!(h.ctx.users.controller().len().await, 3);
}

#[tokio::test]
async fn test_user_delete_of_unknown_account_is_not_found() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.users.fetch_all().await.unwrap();

    let err = h.ctx.users.delete("u-99").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(h.users.list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.users.mutation_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.ctx.users.controller().len().await, 4);
}

#[tokio::test]
async fn test_user_delete_resolves_uncached_account_first() {
    let h = signed_in("admin@clinic.test").await;

    let protected = h.ctx.users.delete("u-4").await.unwrap_err();
    assert!(protected.is_validation());
    assert_eq!(h.users.list_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.users.mutation_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_user_create_refetches() {
    let h = signed_in("admin@clinic.test").await;
    h.ctx.users.fetch_all().await.unwrap();

    let input = UserInput {
        name: "Dr. Lima".to_string(),
        email: "lima@clinic.test".to_string(),
        role: Role::Professional,
        password: Some(PASSWORD.to_string()),
    };
    let created = h.ctx.users.create(&input).await.unwrap().applied().unwrap();

    assert_eq!(created.role, Role::Professional);
    assert_eq!(h.users.list_calls.load(Ordering::SeqCst), 2);
    assert_eq!(h.ctx.users.controller().len().await, 5);
}

#[tokio::test]
async fn test_professional_cannot_manage_users() {
    let h = signed_in("costa@clinic.test").await;
    let err = h.ctx.users.fetch_all().await.unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(h.users.list_calls.load(Ordering::SeqCst), 0);
}
