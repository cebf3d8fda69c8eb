//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tally_core::{
  Error,
  access,
  bootstrap::SeedSummary,
  consistency,
  error::{EntityKind, Resource},
  model::{
    CategoryUpdate, ExpenseUpdate, MealPeriodUpdate, NewCategory,
    NewCategoryGroup, NewExpense, NewInvoice, NewMealPeriod, NewRestaurant,
    NewSale, NewUser, Restaurant, SaleUpdate, User,
  },
  ops::{
    cat_groups, categories, expenses, invoices, meal_periods, restaurants,
    sales, users,
  },
  store::Store,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn add_user(s: &SqliteStore, email: &str) -> User {
  let new = NewUser {
    email_address: email.to_owned(),
    first_name:    "Test".into(),
    last_name:     "User".into(),
    password_hash: format!("hash-of-{email}"),
  };
  s.write(move |repo| users::register(repo, &new)).await.unwrap()
}

async fn add_restaurant(s: &SqliteStore, owner: i64, name: &str) -> Restaurant {
  let fields = NewRestaurant {
    name: name.to_owned(),
    ..Default::default()
  };
  s.write(move |repo| restaurants::register(repo, owner, &fields))
    .await
    .unwrap()
}

async fn add_seeded(
  s: &SqliteStore,
  owner: i64,
  name: &str,
) -> (Restaurant, SeedSummary) {
  let fields = NewRestaurant {
    name: name.to_owned(),
    ..Default::default()
  };
  s.write(move |repo| restaurants::register_with_defaults(repo, owner, &fields))
    .await
    .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

// ─── Bootstrap ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn bootstrap_seeds_the_standard_template() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (restaurant, summary) = add_seeded(&s, owner.id, "Rest1").await;
  assert_eq!(summary.allocations.len(), 15);

  let rid = restaurant.id;
  let (periods, groups, cats, defaults, allocations) = s
    .read(move |repo| {
      Ok((
        repo.list_meal_periods(rid)?,
        repo.list_cat_groups(rid)?,
        repo.list_categories(rid)?,
        repo.list_default_sales(rid)?,
        repo.list_allocations(rid)?,
      ))
    })
    .await
    .unwrap();

  assert_eq!(periods.len(), 3);
  assert_eq!(groups.len(), 3);
  assert_eq!(cats.len(), 6);
  assert_eq!(defaults.len(), 8);
  assert_eq!(allocations.len(), 15);

  for period in &periods {
    let total: Decimal = allocations
      .iter()
      .filter(|a| a.meal_period_id == period.id)
      .map(|a| a.sales_percent_of_period)
      .sum();
    assert_eq!(total, Decimal::ONE, "allocations for {}", period.name);
  }

  assert!(cats.iter().all(|c| c.cat_group_id.is_some()));
  let wine = cats.iter().find(|c| c.name == "Wine").unwrap();
  assert_eq!(wine.cogs_percent, Decimal::new(30, 2));

  let friday_dinner = defaults
    .iter()
    .find(|d| d.day_id == 5 && d.total == Decimal::new(10000, 0));
  assert!(friday_dinner.is_some());
}

#[tokio::test]
async fn failed_bootstrap_leaves_nothing_behind() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;

  let fields = NewRestaurant {
    name: "Doomed".into(),
    ..Default::default()
  };
  let owner_id = owner.id;
  let err = s
    .write(move |repo| {
      let (restaurant, _) =
        restaurants::register_with_defaults(repo, owner_id, &fields)?;
      // A second seeding collides on the first meal period name.
      tally_core::bootstrap::seed(repo, restaurant.id)
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Duplicate(_)));

  let memberships = s
    .read(move |repo| repo.list_user_memberships(owner_id))
    .await
    .unwrap();
  assert!(memberships.is_empty());
}

// ─── Restaurant lifecycle ────────────────────────────────────────────────────

#[tokio::test]
async fn register_creates_owner_admin_membership() {
  let s = store().await;
  let u1 = add_user(&s, "u1@example.com").await;
  let r = add_restaurant(&s, u1.id, "Rest1").await;
  assert_eq!(r.owner_id, u1.id);

  let (uid, rid) = (u1.id, r.id);
  let detail = s
    .read(move |repo| restaurants::get(repo, uid, rid))
    .await
    .unwrap();
  assert!(detail.is_owner);
  assert!(detail.is_admin);
  assert_eq!(detail.users.len(), 1);
  assert_eq!(detail.users[0].user_id, u1.id);
  assert!(detail.users[0].is_admin);
}

#[tokio::test]
async fn admin_implies_member() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let staff = add_user(&s, "staff@example.com").await;
  let outsider = add_user(&s, "outsider@example.com").await;
  let r = add_restaurant(&s, owner.id, "Rest1").await;

  let (oid, sid, xid, rid) = (owner.id, staff.id, outsider.id, r.id);
  s.write(move |repo| restaurants::add_member(repo, oid, rid, sid, false))
    .await
    .unwrap();

  let checks = s
    .read(move |repo| {
      let mut out = Vec::new();
      for uid in [oid, sid, xid] {
        out.push((
          access::is_member(repo, rid, uid)?,
          access::is_admin(repo, rid, uid)?,
        ));
      }
      Ok(out)
    })
    .await
    .unwrap();

  assert_eq!(checks, vec![(true, true), (true, false), (false, false)]);
  for (member, admin) in checks {
    assert!(!admin || member);
  }
}

#[tokio::test]
async fn access_checks_report_missing_rows_first() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let oid = owner.id;

  let err = s
    .read(move |repo| access::is_member(repo, 999, oid))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound(Resource { kind: EntityKind::Restaurant, id: 999 })
  ));
}

#[tokio::test]
async fn owner_membership_cannot_be_demoted_or_removed() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let admin = add_user(&s, "admin@example.com").await;
  let r = add_restaurant(&s, owner.id, "Rest1").await;
  let (oid, aid, rid) = (owner.id, admin.id, r.id);
  s.write(move |repo| restaurants::add_member(repo, oid, rid, aid, true))
    .await
    .unwrap();

  let demote = s
    .write(move |repo| restaurants::update_member(repo, aid, rid, oid, false))
    .await
    .unwrap_err();
  assert!(matches!(demote, Error::OwnerMembership));

  let remove = s
    .write(move |repo| restaurants::remove_member(repo, aid, rid, oid))
    .await
    .unwrap_err();
  assert!(matches!(remove, Error::OwnerMembership));

  // The owner is blocked on their own row too.
  let self_remove = s
    .write(move |repo| restaurants::remove_member(repo, oid, rid, oid))
    .await
    .unwrap_err();
  assert!(matches!(self_remove, Error::OwnerMembership));

  let still_admin = s
    .read(move |repo| access::is_admin(repo, rid, oid))
    .await
    .unwrap();
  assert!(still_admin);
}

#[tokio::test]
async fn members_may_remove_themselves_but_not_others() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let a = add_user(&s, "a@example.com").await;
  let b = add_user(&s, "b@example.com").await;
  let r = add_restaurant(&s, owner.id, "Rest1").await;
  let (oid, aid, bid, rid) = (owner.id, a.id, b.id, r.id);

  s.write(move |repo| {
    restaurants::add_member(repo, oid, rid, aid, false)?;
    restaurants::add_member(repo, oid, rid, bid, false)
  })
  .await
  .unwrap();

  let err = s
    .write(move |repo| restaurants::remove_member(repo, aid, rid, bid))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unauthorized { user_id, .. } if user_id == aid));

  s.write(move |repo| restaurants::remove_member(repo, aid, rid, aid))
    .await
    .unwrap();
  let member = s
    .read(move |repo| access::is_member(repo, rid, aid))
    .await
    .unwrap();
  assert!(!member);
}

#[tokio::test]
async fn duplicate_membership_is_rejected() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let r = add_restaurant(&s, owner.id, "Rest1").await;
  let (oid, rid) = (owner.id, r.id);

  let err = s
    .write(move |repo| restaurants::add_member(repo, oid, rid, oid, false))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Duplicate(_)));
}

#[tokio::test]
async fn deleting_a_user_removes_their_restaurants() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let r = add_restaurant(&s, owner.id, "Rest1").await;
  let (oid, rid) = (owner.id, r.id);

  s.write(move |repo| users::delete(repo, oid, oid)).await.unwrap();
  let gone = s.read(move |repo| repo.get_restaurant(rid)).await.unwrap();
  assert!(gone.is_none());
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let r = add_restaurant(&s, owner.id, "Rest1").await;
  let (oid, rid) = (owner.id, r.id);

  s.write(move |repo| users::delete(repo, oid, oid)).await.unwrap();

  let next = add_user(&s, "next@example.com").await;
  assert!(next.id > oid);
  let again = add_restaurant(&s, next.id, "Rest1").await;
  assert!(again.id > rid);
}

// ─── Consistency ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn cross_restaurant_group_is_rejected() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let r1 = add_restaurant(&s, owner.id, "Rest1").await;
  let r2 = add_restaurant(&s, owner.id, "Rest2").await;
  let (oid, rid1, rid2) = (owner.id, r1.id, r2.id);

  let g1 = s
    .write(move |repo| {
      cat_groups::register(repo, oid, &NewCategoryGroup {
        restaurant_id: rid2,
        name:          "Food Group".into(),
        notes:         None,
      })
    })
    .await
    .unwrap();

  let gid = g1.id;
  let err = s
    .write(move |repo| {
      categories::register(repo, oid, &NewCategory {
        restaurant_id: rid1,
        name:          "Food".into(),
        cat_group_id:  Some(gid),
        cogs_percent:  Decimal::new(35, 2),
        notes:         None,
      })
    })
    .await
    .unwrap_err();

  assert!(matches!(err, Error::NotSameRestaurant(_)));
  assert_eq!(
    err.to_string(),
    format!(
      "category group {gid} and restaurant {rid1} are not associated with the \
       same restaurant"
    )
  );

  let created = s
    .read(move |repo| repo.find_category(rid1, "Food"))
    .await
    .unwrap();
  assert!(created.is_none());
}

#[tokio::test]
async fn existence_precedes_relationship() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (_, seeded) = add_seeded(&s, owner.id, "Rest1").await;
  let (_, other) = add_seeded(&s, owner.id, "Rest2").await;

  // Category 999 is missing and the group belongs elsewhere; the missing row
  // wins.
  let group = other.cat_groups[0];
  let err = s
    .read(move |repo| consistency::category_and_group_match(repo, 999, group))
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound(Resource { kind: EntityKind::Category, id: 999 })
  ));

  let (category, period) = (seeded.categories[0], other.meal_periods[0]);
  let err = s
    .read(move |repo| {
      consistency::expense_invoice_category_match(repo, 4242, 1, category)
    })
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::NotFound(Resource { kind: EntityKind::Expense, id: 4242 })
  ));

  let err = s
    .read(move |repo| {
      consistency::category_and_meal_period_match(repo, category, period)
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotSameRestaurant(ref r) if r.len() == 2));
}

#[tokio::test]
async fn expense_moves_are_rechecked() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (r1, seeded) = add_seeded(&s, owner.id, "Rest1").await;
  let (_, other) = add_seeded(&s, owner.id, "Rest2").await;
  let (oid, rid) = (owner.id, r1.id);
  let food = seeded.categories[0];

  let expense = s
    .write(move |repo| {
      let invoice = invoices::register(repo, oid, &NewInvoice {
        restaurant_id: rid,
        date:          date(2024, 3, 1),
        invoice:       "A-100".into(),
        vendor:        "Produce Co".into(),
        total:         Decimal::new(25000, 2),
        notes:         None,
      })?;
      expenses::register(repo, oid, &NewExpense {
        restaurant_id: rid,
        category_id:   food,
        invoice_id:    invoice.id,
        amount:        Decimal::new(25000, 2),
        notes:         None,
      })
    })
    .await
    .unwrap();

  let foreign = other.categories[0];
  let eid = expense.id;
  let err = s
    .write(move |repo| {
      expenses::update(repo, oid, eid, ExpenseUpdate {
        category_id: Some(foreign),
        ..Default::default()
      })
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::NotSameRestaurant(ref r) if r.len() == 3));

  let unchanged = s.read(move |repo| repo.get_expense(eid)).await.unwrap();
  assert_eq!(unchanged.unwrap().category_id, food);
}

// ─── Access policy ───────────────────────────────────────────────────────────

#[tokio::test]
async fn category_reads_require_membership() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let outsider = add_user(&s, "outsider@example.com").await;
  let (_, seeded) = add_seeded(&s, owner.id, "Rest1").await;
  let (oid, xid, cid) = (owner.id, outsider.id, seeded.categories[0]);

  let err = s
    .read(move |repo| categories::get(repo, xid, cid))
    .await
    .unwrap_err();
  assert_eq!(
    err.to_string(),
    format!("user {xid} is not authorized to view category {cid}")
  );

  let detail = s
    .read(move |repo| categories::get(repo, oid, cid))
    .await
    .unwrap();
  assert_eq!(detail.category.name, "Food");
  assert_eq!(detail.restaurant_name, "Rest1");
  assert_eq!(
    detail.cat_group_name.as_deref(),
    Some("Food & Non-Alcoholic Beverages")
  );
}

#[tokio::test]
async fn taxonomy_writes_require_admin() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let staff = add_user(&s, "staff@example.com").await;
  let r = add_restaurant(&s, owner.id, "Rest1").await;
  let (oid, sid, rid) = (owner.id, staff.id, r.id);
  s.write(move |repo| restaurants::add_member(repo, oid, rid, sid, false))
    .await
    .unwrap();

  let err = s
    .write(move |repo| {
      meal_periods::register(repo, sid, &NewMealPeriod {
        restaurant_id: rid,
        name:          "Late Night".into(),
        notes:         None,
      })
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unauthorized { .. }));

  // Members may still record invoices.
  s.write(move |repo| {
    invoices::register(repo, sid, &NewInvoice {
      restaurant_id: rid,
      date:          date(2024, 3, 2),
      invoice:       "B-7".into(),
      vendor:        "Brewery".into(),
      total:         Decimal::new(900, 0),
      notes:         None,
    })
  })
  .await
  .unwrap();
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicates_are_rejected_and_leave_the_store_unchanged() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (r, _) = add_seeded(&s, owner.id, "Rest1").await;
  let (oid, rid) = (owner.id, r.id);

  let err = s
    .write(move |repo| {
      meal_periods::register(repo, oid, &NewMealPeriod {
        restaurant_id: rid,
        name:          "Dinner".into(),
        notes:         None,
      })
    })
    .await
    .unwrap_err();
  assert_eq!(
    err.to_string(),
    format!("Dinner is already a meal period for restaurant {rid}")
  );

  let invoice = move || NewInvoice {
    restaurant_id: rid,
    date:          date(2024, 3, 1),
    invoice:       "A-100".into(),
    vendor:        "Produce Co".into(),
    total:         Decimal::new(100, 0),
    notes:         None,
  };
  s.write(move |repo| invoices::register(repo, oid, &invoice()))
    .await
    .unwrap();
  let err = s
    .write(move |repo| invoices::register(repo, oid, &invoice()))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Duplicate(_)));

  let (periods, invoices) = s
    .read(move |repo| Ok((repo.list_meal_periods(rid)?, repo.list_invoices(rid)?)))
    .await
    .unwrap();
  assert_eq!(periods.len(), 3);
  assert_eq!(invoices.len(), 1);
}

#[tokio::test]
async fn renaming_onto_an_existing_name_is_rejected() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (_, seeded) = add_seeded(&s, owner.id, "Rest1").await;
  let (oid, brunch) = (owner.id, seeded.meal_periods[0]);

  let err = s
    .write(move |repo| {
      meal_periods::update(repo, oid, brunch, MealPeriodUpdate {
        name: Some("Lunch".into()),
        ..Default::default()
      })
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Duplicate(_)));
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_write_rolls_back() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let oid = owner.id;

  let err = s
    .write(move |repo| {
      restaurants::register(repo, oid, &NewRestaurant {
        name: "Half Built".into(),
        ..Default::default()
      })?;
      Err::<(), _>(Error::Invalid("abort".into()))
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Invalid(_)));

  let profile = s.read(move |repo| users::get(repo, oid, oid)).await.unwrap();
  assert!(profile.restaurants.is_empty());
}

// ─── Categories & groups ─────────────────────────────────────────────────────

#[tokio::test]
async fn change_group_zero_clears_and_group_delete_ungroups() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (_, seeded) = add_seeded(&s, owner.id, "Rest1").await;
  let (oid, food, beer) = (owner.id, seeded.categories[0], seeded.categories[2]);
  let alcohol = seeded.cat_groups[1];

  let cleared = s
    .write(move |repo| categories::change_group(repo, oid, food, 0))
    .await
    .unwrap();
  assert_eq!(cleared.cat_group_id, None);

  s.write(move |repo| cat_groups::delete(repo, oid, alcohol))
    .await
    .unwrap();
  let beer = s
    .read(move |repo| repo.get_category(beer))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(beer.cat_group_id, None);

  let err = s
    .write(move |repo| {
      categories::update(repo, oid, food, CategoryUpdate {
        cogs_percent: Some(Decimal::new(15, 1)),
        ..Default::default()
      })
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Invalid(_)));
}

// ─── Dates ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn invoices_and_expenses_by_date_range() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (r, seeded) = add_seeded(&s, owner.id, "Rest1").await;
  let (oid, rid, wine) = (owner.id, r.id, seeded.categories[4]);

  s.write(move |repo| {
    for (day, number) in [(1, "W-1"), (15, "W-2"), (28, "W-3")] {
      let invoice = invoices::register(repo, oid, &NewInvoice {
        restaurant_id: rid,
        date:          date(2024, 2, day),
        invoice:       number.into(),
        vendor:        "Wine Co".into(),
        total:         Decimal::new(500, 0),
        notes:         None,
      })?;
      expenses::register(repo, oid, &NewExpense {
        restaurant_id: rid,
        category_id:   wine,
        invoice_id:    invoice.id,
        amount:        Decimal::new(500, 0),
        notes:         None,
      })?;
    }
    Ok(())
  })
  .await
  .unwrap();

  let (found, spent) = s
    .read(move |repo| {
      let start = date(2024, 2, 10);
      let end = date(2024, 2, 28);
      Ok((
        invoices::list_between(repo, oid, rid, start, end)?,
        expenses::list_between(repo, oid, rid, start, end)?,
      ))
    })
    .await
    .unwrap();
  let numbers: Vec<_> = found.iter().map(|i| i.invoice.as_str()).collect();
  assert_eq!(numbers, ["W-2", "W-3"]);
  assert_eq!(spent.len(), 2);

  let err = s
    .read(move |repo| {
      invoices::list_between(repo, oid, rid, date(2024, 3, 1), date(2024, 2, 1))
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Invalid(_)));
}

#[tokio::test]
async fn sale_figures_and_notes_can_be_cleared() {
  let s = store().await;
  let owner = add_user(&s, "owner@example.com").await;
  let (r, seeded) = add_seeded(&s, owner.id, "Rest1").await;
  let (oid, rid, allocation) = (owner.id, r.id, seeded.allocations[0]);

  let sale = s
    .write(move |repo| {
      sales::register(repo, oid, &NewSale {
        restaurant_id:      rid,
        meal_period_cat_id: allocation,
        date:               date(2024, 2, 3),
        expected_sales:     Decimal::new(1200, 0),
        actual_sales:       Some(Decimal::new(1350, 0)),
        notes:              Some("busy".into()),
      })
    })
    .await
    .unwrap();
  let sid = sale.id;

  let kept = s
    .write(move |repo| {
      sales::update(repo, oid, sid, SaleUpdate {
        expected_sales: Some(Decimal::new(1300, 0)),
        ..Default::default()
      })
    })
    .await
    .unwrap();
  assert_eq!(kept.actual_sales, Some(Decimal::new(1350, 0)));
  assert_eq!(kept.notes.as_deref(), Some("busy"));

  let cleared = s
    .write(move |repo| {
      sales::update(repo, oid, sid, SaleUpdate {
        actual_sales: Some(None),
        notes: Some(None),
        ..Default::default()
      })
    })
    .await
    .unwrap();
  assert_eq!(cleared.actual_sales, None);
  assert_eq!(cleared.notes, None);
  assert_eq!(cleared.expected_sales, Decimal::new(1300, 0));

  let stored = s.read(move |repo| repo.get_sale(sid)).await.unwrap().unwrap();
  assert_eq!(stored, cleared);
}

// ─── Authentication ──────────────────────────────────────────────────────────

#[tokio::test]
async fn authenticate_hides_which_half_failed() {
  let s = store().await;
  add_user(&s, "chef@example.com").await;

  let verify = |password: &str, hash: &str| hash == format!("hash-of-{password}");

  let ok = s
    .read(move |repo| {
      users::authenticate(repo, "chef@example.com", "chef@example.com", verify)
    })
    .await
    .unwrap();
  assert_eq!(ok.email_address, "chef@example.com");

  let wrong_password = s
    .read(move |repo| users::authenticate(repo, "chef@example.com", "nope", verify))
    .await
    .unwrap_err();
  let unknown_email = s
    .read(move |repo| {
      users::authenticate(repo, "nobody@example.com", "nope", verify)
    })
    .await
    .unwrap_err();
  assert_eq!(wrong_password.to_string(), unknown_email.to_string());
  assert!(matches!(wrong_password, Error::InvalidCredentials));
}

#[tokio::test]
async fn users_only_see_themselves() {
  let s = store().await;
  let a = add_user(&s, "a@example.com").await;
  let b = add_user(&s, "b@example.com").await;
  let (aid, bid) = (a.id, b.id);

  let err = s
    .read(move |repo| users::get(repo, aid, bid))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Unauthorized { .. }));
}
