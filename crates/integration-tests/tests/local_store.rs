//! The desk over the filesystem store: state survives a restart.

use std::sync::Arc;

use integration_tests::desk_over;
use rt_core::{LoginForm, SignupForm, TicketForm};
use rt_storage_local::LocalKeyValueStore;

#[test]
fn users_tickets_and_session_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();

    let ticket_id = {
        let desk = desk_over(Arc::new(LocalKeyValueStore::open(dir.path()).unwrap()));
        let authed = desk
            .sign_up(&SignupForm {
                name: "Alice".into(),
                email: "a@x.com".into(),
                password: "secret".into(),
                confirm_password: "secret".into(),
            })
            .unwrap();
        authed.create_ticket(TicketForm::new("Bug", "Crashes")).unwrap().id
    };

    let desk = desk_over(Arc::new(LocalKeyValueStore::open(dir.path()).unwrap()));

    let resumed = desk.resume().unwrap().expect("session kept across restart");
    assert_eq!(resumed.user().email, "a@x.com");
    assert_eq!(resumed.tickets().unwrap()[0].id, ticket_id);

    resumed.sign_out().unwrap();
    let desk = desk_over(Arc::new(LocalKeyValueStore::open(dir.path()).unwrap()));
    assert!(desk.resume().unwrap().is_none());

    let again = desk
        .sign_in(&LoginForm {
            email: "a@x.com".into(),
            password: "secret".into(),
        })
        .unwrap();
    assert_eq!(again.tickets().unwrap().len(), 1);
}
