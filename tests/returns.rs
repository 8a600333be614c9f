mod common;

use asset_allocation::{
    common::error::AppError,
    models::{
        asset::AssetType,
        assignment::{AssignmentStatus, ReclaimMode},
    },
};
use common::{company, employee};

#[tokio::test]
async fn employee_return_then_hr_approval() {
    let acme = company(5, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 2).await;
    let alice = employee();

    let allocation = acme.state.coordinator.direct_assign(&acme.hr, laptop.id, alice.id).await.unwrap();
    let assignment_id = allocation.assignment.id;
    assert_eq!(acme.available(&laptop).await, 1);

    let requested = acme.state.coordinator.request_return(&alice, assignment_id).await.unwrap();
    assert_eq!(requested.status, AssignmentStatus::ReturnRequested);
    assert!(requested.return_requested_at.is_some());
    assert_eq!(acme.available(&laptop).await, 1);

    let returned = acme.state.coordinator.approve_return(&acme.hr, assignment_id).await.unwrap();
    assert_eq!(returned.status, AssignmentStatus::Returned);
    assert!(returned.returned_at.is_some());
    assert_eq!(acme.available(&laptop).await, 2);

    let stored = acme.store.assignment(assignment_id).await.unwrap();
    assert_eq!(stored.status, AssignmentStatus::Returned);
}

#[tokio::test]
async fn return_rules_are_enforced() {
    let acme = company(5, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 2).await;
    let pen = acme.stock("Pen", AssetType::NonReturnable, 2).await;
    let alice = employee();

    let laptop_assignment = acme
        .state
        .coordinator
        .direct_assign(&acme.hr, laptop.id, alice.id)
        .await
        .unwrap()
        .assignment;
    let pen_assignment = acme
        .state
        .coordinator
        .direct_assign(&acme.hr, pen.id, alice.id)
        .await
        .unwrap()
        .assignment;

    // Consumables stay with the employee
    let result = acme.state.coordinator.request_return(&alice, pen_assignment.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    // Someone else's assignment
    let result = acme.state.coordinator.request_return(&employee(), laptop_assignment.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    // Nothing to approve yet
    let result = acme.state.coordinator.approve_return(&acme.hr, laptop_assignment.id).await;
    assert!(matches!(result, Err(AppError::InvalidState(_))));

    acme.state.coordinator.request_return(&alice, laptop_assignment.id).await.unwrap();

    let result = acme.state.coordinator.request_return(&alice, laptop_assignment.id).await;
    assert!(matches!(result, Err(AppError::InvalidState(_))));

    let other = company(5, 0).await;
    let result = acme.state.coordinator.approve_return(&other.hr, laptop_assignment.id).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    assert_eq!(acme.available(&laptop).await, 1);
}

#[tokio::test]
async fn forced_return_cannot_run_twice() {
    let acme = company(5, 0).await;
    let pen = acme.stock("Pen", AssetType::NonReturnable, 1).await;
    let alice = employee();

    let assignment = acme
        .state
        .coordinator
        .direct_assign(&acme.hr, pen.id, alice.id)
        .await
        .unwrap()
        .assignment;

    acme.state
        .coordinator
        .reclaim(&acme.hr, assignment.id, ReclaimMode::ForcedReturn)
        .await
        .unwrap();
    assert_eq!(acme.available(&pen).await, 1);

    let again = acme
        .state
        .coordinator
        .reclaim(&acme.hr, assignment.id, ReclaimMode::ForcedReturn)
        .await;
    assert!(matches!(again, Err(AppError::InvalidState(_))));
    assert_eq!(acme.available(&pen).await, 1);
}

#[tokio::test]
async fn removing_an_employee_reclaims_everything() {
    let acme = company(5, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 2).await;
    let phone = acme.stock("Phone", AssetType::Returnable, 2).await;
    let alice = employee();
    let bob = employee();

    let first = acme.state.coordinator.direct_assign(&acme.hr, laptop.id, alice.id).await.unwrap();
    let second = acme.state.coordinator.direct_assign(&acme.hr, phone.id, alice.id).await.unwrap();
    let bobs = acme.state.coordinator.direct_assign(&acme.hr, laptop.id, bob.id).await.unwrap();

    // A pending return is still outstanding
    acme.state
        .coordinator
        .request_return(&alice, second.assignment.id)
        .await
        .unwrap();

    assert_eq!(acme.seats().await, 2);
    assert_eq!(acme.available(&laptop).await, 0);
    assert_eq!(acme.available(&phone).await, 1);

    let report = acme
        .state
        .coordinator
        .remove_affiliation(&acme.hr, alice.id, acme.hr.id)
        .await
        .unwrap();

    assert!(report.is_complete());
    assert_eq!(report.affiliation.employee_id, alice.id);
    assert_eq!(report.reclaimed.len(), 2);
    assert!(report.reclaimed.contains(&first.assignment.id));
    assert!(report.reclaimed.contains(&second.assignment.id));

    assert_eq!(acme.available(&laptop).await, 1);
    assert_eq!(acme.available(&phone).await, 2);
    assert_eq!(acme.seats().await, 1);
    assert_eq!(acme.store.affiliation_count(alice.id, acme.hr.id).await, 0);

    for id in [first.assignment.id, second.assignment.id] {
        assert_eq!(
            acme.store.assignment(id).await.unwrap().status,
            AssignmentStatus::Returned
        );
    }
    // Bob keeps his laptop
    assert_eq!(
        acme.store.assignment(bobs.assignment.id).await.unwrap().status,
        AssignmentStatus::Assigned
    );
}

#[tokio::test]
async fn removal_is_owner_scoped() {
    let acme = company(5, 0).await;
    let other = company(5, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 1).await;
    let alice = employee();
    acme.state.coordinator.direct_assign(&acme.hr, laptop.id, alice.id).await.unwrap();

    let result = acme
        .state
        .coordinator
        .remove_affiliation(&other.hr, alice.id, acme.hr.id)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let result = acme
        .state
        .coordinator
        .remove_affiliation(&acme.hr, employee().id, acme.hr.id)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    assert_eq!(acme.seats().await, 1);
}

#[tokio::test]
async fn removed_employee_takes_a_new_seat_when_rehired() {
    let acme = company(1, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 2).await;
    let alice = employee();
    let bob = employee();

    acme.state.coordinator.direct_assign(&acme.hr, laptop.id, alice.id).await.unwrap();

    let result = acme.state.coordinator.direct_assign(&acme.hr, laptop.id, bob.id).await;
    assert!(matches!(result, Err(AppError::QuotaExceeded)));

    acme.state
        .coordinator
        .remove_affiliation(&acme.hr, alice.id, acme.hr.id)
        .await
        .unwrap();

    let allocation = acme.state.coordinator.direct_assign(&acme.hr, laptop.id, bob.id).await.unwrap();
    assert!(allocation.affiliation_created);
    assert_eq!(acme.seats().await, 1);
}

// --- Owner edits ---

#[tokio::test]
async fn quantity_edit_keeps_assigned_units() {
    let acme = company(5, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 10).await;

    for _ in 0..2 {
        acme.state
            .coordinator
            .direct_assign(&acme.hr, laptop.id, employee().id)
            .await
            .unwrap();
    }

    let edited = acme.state.inventory.adjust_total(&acme.hr, laptop.id, -3).await.unwrap();
    assert_eq!(edited.total_quantity, 7);
    assert_eq!(edited.available_quantity, 5);

    // Below the two units out on loan
    let result = acme.state.inventory.adjust_total(&acme.hr, laptop.id, -6).await;
    assert!(matches!(result, Err(AppError::InvalidState(_))));

    let other = company(5, 0).await;
    let result = acme.state.inventory.adjust_total(&other.hr, laptop.id, 1).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    assert_eq!(acme.available(&laptop).await, 5);
}

#[tokio::test]
async fn assets_with_units_out_cannot_be_removed() {
    let acme = company(5, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 1).await;
    let alice = employee();

    let assignment = acme
        .state
        .coordinator
        .direct_assign(&acme.hr, laptop.id, alice.id)
        .await
        .unwrap()
        .assignment;

    let result = acme.state.inventory.remove(&acme.hr, laptop.id).await;
    assert!(matches!(result, Err(AppError::InvalidState(_))));

    acme.state
        .coordinator
        .reclaim(&acme.hr, assignment.id, ReclaimMode::ForcedReturn)
        .await
        .unwrap();

    acme.state.inventory.remove(&acme.hr, laptop.id).await.unwrap();
    assert!(matches!(
        acme.state.inventory.get(laptop.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn ledgers_list_per_caller() {
    let acme = company(5, 0).await;
    let laptop = acme.stock("Laptop", AssetType::Returnable, 3).await;
    let alice = employee();

    let first = acme.state.coordinator.direct_assign(&acme.hr, laptop.id, alice.id).await.unwrap();
    acme.state.coordinator.direct_assign(&acme.hr, laptop.id, alice.id).await.unwrap();

    let mine = acme.state.assignments.list_for_employee(&alice).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(acme.state.assignments.list_for_employee(&employee()).await.unwrap().is_empty());

    let fetched = acme.state.assignments.get(&acme.hr, first.assignment.id).await.unwrap();
    assert_eq!(fetched.employee_id, alice.id);
    assert!(matches!(
        acme.state.assignments.get(&employee(), first.assignment.id).await,
        Err(AppError::Forbidden(_))
    ));

    let companies = acme.state.affiliations.list_by_employee(alice.id).await.unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].company_name.as_deref(), Some("Acme"));

    let staff = acme.state.affiliations.list_by_owner(acme.hr.id).await.unwrap();
    assert_eq!(staff.len(), 1);
    assert!(acme.state.affiliations.find(alice.id, acme.hr.id).await.unwrap().is_some());

    let assets = acme.state.inventory.list(acme.hr.id).await.unwrap();
    assert_eq!(assets.len(), 1);
}
