//! Entity types: the rows of the Tally store and the inputs that create and
//! update them.
//!
//! Every restaurant-scoped row carries its `restaurant_id`; following that
//! field is how the consistency checks and the access oracle resolve a row
//! back to its tenant. Money and fractions are [`Decimal`], never floats.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ─── Users ───────────────────────────────────────────────────────────────────

/// An account. The password hash never leaves the store through this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id:            i64,
  pub email_address: String,
  pub first_name:    String,
  pub last_name:     String,
}

/// A user paired with the stored password hash; used only to authenticate.
#[derive(Debug, Clone)]
pub struct UserCredentials {
  pub user:          User,
  pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
  pub email_address: String,
  pub first_name:    String,
  pub last_name:     String,
  /// PHC string; hashing happens at the boundary.
  pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
  pub email_address: Option<String>,
  pub first_name:    Option<String>,
  pub last_name:     Option<String>,
  pub password_hash: Option<String>,
}

// ─── Restaurants & membership ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
  pub id:       i64,
  pub owner_id: i64,
  pub name:     String,
  pub address:  Option<String>,
  pub phone:    Option<String>,
  pub email:    Option<String>,
  pub website:  Option<String>,
  pub notes:    Option<String>,
}

/// Descriptive fields supplied when registering a restaurant; the owner is
/// always the acting user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRestaurant {
  pub name:    String,
  pub address: Option<String>,
  pub phone:   Option<String>,
  pub email:   Option<String>,
  pub website: Option<String>,
  pub notes:   Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUpdate {
  pub name:    Option<String>,
  pub address: Option<String>,
  pub phone:   Option<String>,
  pub email:   Option<String>,
  pub website: Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub notes:   Option<Option<String>>,
}

/// A membership row: the access-control list entry linking a user to a
/// restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantUser {
  pub restaurant_id: i64,
  pub user_id:       i64,
  pub is_admin:      bool,
}

// ─── Taxonomy ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
  pub id:            i64,
  pub restaurant_id: i64,
  pub name:          String,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategoryGroup {
  pub restaurant_id: i64,
  pub name:          String,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroupUpdate {
  pub name:  Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
  pub id:            i64,
  pub restaurant_id: i64,
  pub name:          String,
  pub cat_group_id:  Option<i64>,
  /// Cost of goods sold as a fraction of revenue, in `[0, 1]`.
  pub cogs_percent:  Decimal,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
  pub restaurant_id: i64,
  pub name:          String,
  pub cat_group_id:  Option<i64>,
  pub cogs_percent:  Decimal,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
  pub name:         Option<String>,
  /// Absent keeps the group, `null` clears it.
  #[serde(default, deserialize_with = "present")]
  pub cat_group_id: Option<Option<i64>>,
  pub cogs_percent: Option<Decimal>,
  #[serde(default, deserialize_with = "present")]
  pub notes:        Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPeriod {
  pub id:            i64,
  pub restaurant_id: i64,
  pub name:          String,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMealPeriod {
  pub restaurant_id: i64,
  pub name:          String,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPeriodUpdate {
  pub name:  Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub notes: Option<Option<String>>,
}

/// The share of a meal period's sales expected to land in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPeriodCategory {
  pub id:                      i64,
  pub restaurant_id:           i64,
  pub meal_period_id:          i64,
  pub category_id:             i64,
  pub sales_percent_of_period: Decimal,
  pub notes:                   Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMealPeriodCategory {
  pub restaurant_id:           i64,
  pub meal_period_id:          i64,
  pub category_id:             i64,
  pub sales_percent_of_period: Decimal,
  pub notes:                   Option<String>,
}

/// Body of `POST /mealperiods/{id}/categories/{categoryId}`; the ids come
/// from the path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationFields {
  pub sales_percent_of_period: Decimal,
  pub notes:                   Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationUpdate {
  pub sales_percent_of_period: Option<Decimal>,
  #[serde(default, deserialize_with = "present")]
  pub notes:                   Option<Option<String>>,
}

// ─── Sales ───────────────────────────────────────────────────────────────────

/// Days are numbered Monday = 1 through Sunday = 7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOfWeek {
  pub id:   i64,
  pub name: String,
}

/// The baseline total expected for a meal period on a given weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSale {
  pub id:             i64,
  pub restaurant_id:  i64,
  pub meal_period_id: i64,
  pub day_id:         i64,
  pub total:          Decimal,
  pub notes:          Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDefaultSale {
  pub restaurant_id:  i64,
  pub meal_period_id: i64,
  pub day_id:         i64,
  pub total:          Decimal,
  pub notes:          Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSaleUpdate {
  pub total: Option<Decimal>,
  #[serde(default, deserialize_with = "present")]
  pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
  pub id:                 i64,
  pub restaurant_id:      i64,
  pub meal_period_cat_id: i64,
  pub date:               NaiveDate,
  pub expected_sales:     Decimal,
  /// Unknown until the day has been traded.
  pub actual_sales:       Option<Decimal>,
  pub notes:              Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
  pub restaurant_id:      i64,
  pub meal_period_cat_id: i64,
  pub date:               NaiveDate,
  pub expected_sales:     Decimal,
  pub actual_sales:       Option<Decimal>,
  pub notes:              Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdate {
  pub expected_sales: Option<Decimal>,
  /// Absent keeps the recorded figure, `null` clears it.
  #[serde(default, deserialize_with = "present")]
  pub actual_sales:   Option<Option<Decimal>>,
  #[serde(default, deserialize_with = "present")]
  pub notes:          Option<Option<String>>,
}

// ─── Purchasing ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
  pub id:            i64,
  pub restaurant_id: i64,
  pub date:          NaiveDate,
  /// The vendor's invoice number.
  pub invoice:       String,
  pub vendor:        String,
  pub total:         Decimal,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
  pub restaurant_id: i64,
  pub date:          NaiveDate,
  pub invoice:       String,
  pub vendor:        String,
  pub total:         Decimal,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUpdate {
  pub date:    Option<NaiveDate>,
  pub invoice: Option<String>,
  pub vendor:  Option<String>,
  pub total:   Option<Decimal>,
  #[serde(default, deserialize_with = "present")]
  pub notes:   Option<Option<String>>,
}

/// One line of an invoice, charged to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
  pub id:            i64,
  pub restaurant_id: i64,
  pub category_id:   i64,
  pub invoice_id:    i64,
  pub amount:        Decimal,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
  pub restaurant_id: i64,
  pub category_id:   i64,
  pub invoice_id:    i64,
  pub amount:        Decimal,
  pub notes:         Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
  pub category_id: Option<i64>,
  pub invoice_id:  Option<i64>,
  pub amount:      Option<Decimal>,
  #[serde(default, deserialize_with = "present")]
  pub notes:       Option<Option<String>>,
}

// ─── Read models ─────────────────────────────────────────────────────────────

/// Everything a member sees when opening a restaurant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
  #[serde(flatten)]
  pub restaurant:             Restaurant,
  pub users:                  Vec<RestaurantUser>,
  pub meal_periods:           Vec<MealPeriod>,
  pub categories:             Vec<Category>,
  pub cat_groups:             Vec<CategoryGroup>,
  pub meal_period_categories: Vec<MealPeriodCategory>,
  pub invoices:               Vec<Invoice>,
  pub expenses:               Vec<Expense>,
  pub default_sales:          Vec<DefaultSale>,
  pub is_admin:               bool,
  pub is_owner:               bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
  #[serde(flatten)]
  pub category:        Category,
  pub restaurant_name: String,
  pub cat_group_name:  Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPeriodDetail {
  #[serde(flatten)]
  pub meal_period:     MealPeriod,
  pub restaurant_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDetail {
  #[serde(flatten)]
  pub expense: Expense,
  pub invoice: Invoice,
}

/// A restaurant as listed on its member's profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRestaurant {
  #[serde(flatten)]
  pub restaurant: Restaurant,
  pub is_admin:   bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  #[serde(flatten)]
  pub user:        User,
  pub restaurants: Vec<MemberRestaurant>,
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn present<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn category_update_distinguishes_null_from_absent() {
    let absent: CategoryUpdate = serde_json::from_str(r#"{"name":"Food"}"#).unwrap();
    assert_eq!(absent.cat_group_id, None);

    let cleared: CategoryUpdate =
      serde_json::from_str(r#"{"catGroupId":null}"#).unwrap();
    assert_eq!(cleared.cat_group_id, Some(None));

    let moved: CategoryUpdate = serde_json::from_str(r#"{"catGroupId":4}"#).unwrap();
    assert_eq!(moved.cat_group_id, Some(Some(4)));
  }

  #[test]
  fn explicit_null_clears_optional_fields() {
    let absent: SaleUpdate =
      serde_json::from_str(r#"{"expectedSales":"10"}"#).unwrap();
    assert_eq!(absent.actual_sales, None);
    assert_eq!(absent.notes, None);

    let cleared: SaleUpdate =
      serde_json::from_str(r#"{"actualSales":null,"notes":null}"#).unwrap();
    assert_eq!(cleared.actual_sales, Some(None));
    assert_eq!(cleared.notes, Some(None));

    let group: CategoryGroupUpdate =
      serde_json::from_str(r#"{"notes":"seasonal"}"#).unwrap();
    assert_eq!(group.notes, Some(Some("seasonal".into())));
  }

  #[test]
  fn money_serializes_as_string() {
    let sale = DefaultSale {
      id:             1,
      restaurant_id:  1,
      meal_period_id: 2,
      day_id:         5,
      total:          Decimal::new(10000, 0),
      notes:          None,
    };
    let json = serde_json::to_value(&sale).unwrap();
    assert_eq!(json["total"], "10000");
    assert_eq!(json["mealPeriodId"], 2);
  }
}
