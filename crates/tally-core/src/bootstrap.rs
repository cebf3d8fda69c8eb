//! The restaurant bootstrap orchestrator.
//!
//! A new restaurant is seeded from a fixed [`SeedTemplate`]. Creation follows
//! the dependency order of the rows: meal periods and category groups first,
//! then categories (which need group ids), then default sales and allocations
//! (which need meal period and category ids). Everything runs in the caller's
//! unit of work, so a failure part-way leaves nothing behind.
//!
//! Rows in the template refer to each other by name. Names are unique per
//! restaurant, so they double as keys.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
  Error, Result,
  model::{
    NewCategory, NewCategoryGroup, NewDefaultSale, NewMealPeriod,
    NewMealPeriodCategory,
  },
  ops::{allocations, cat_groups, categories, default_sales, meal_periods},
  store::Repository,
};

// ─── Template ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PeriodSeed {
  pub name:  &'static str,
  pub notes: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct CategorySeed {
  pub name:         &'static str,
  pub group:        &'static str,
  pub cogs_percent: Decimal,
}

#[derive(Debug, Clone)]
pub struct DefaultSaleSeed {
  pub period: &'static str,
  /// Monday = 1 through Sunday = 7.
  pub day_id: i64,
  pub total:  Decimal,
}

#[derive(Debug, Clone)]
pub struct AllocationSeed {
  pub period:        &'static str,
  pub category:      &'static str,
  pub sales_percent: Decimal,
}

#[derive(Debug, Clone)]
pub struct SeedTemplate {
  pub meal_periods:  Vec<PeriodSeed>,
  pub cat_groups:    Vec<&'static str>,
  pub categories:    Vec<CategorySeed>,
  pub default_sales: Vec<DefaultSaleSeed>,
  pub allocations:   Vec<AllocationSeed>,
}

const BRUNCH: &str = "Brunch";
const LUNCH: &str = "Lunch";
const DINNER: &str = "Dinner";

const FOOD_GROUP: &str = "Food & Non-Alcoholic Beverages";
const ALCOHOL_GROUP: &str = "Alcoholic Beverages";
const RETAIL_GROUP: &str = "Retail";

const FOOD: &str = "Food";
const NA_BEV: &str = "Non-Alcoholic Beverages";
const BEER: &str = "Beer";
const LIQUOR: &str = "Liquor";
const WINE: &str = "Wine";
const RETAIL: &str = "Retail";

/// `hundredths / 100`.
fn pct(hundredths: i64) -> Decimal { Decimal::new(hundredths, 2) }

impl SeedTemplate {
  /// The template every new restaurant starts from.
  pub fn standard() -> Self {
    let category = |name, group, cogs| CategorySeed {
      name,
      group,
      cogs_percent: pct(cogs),
    };
    let default_sale = |period, day_id, total| DefaultSaleSeed {
      period,
      day_id,
      total: Decimal::new(total, 0),
    };
    let split = |period, beer, food, liquor, na_bev, wine| {
      [
        (BEER, beer),
        (FOOD, food),
        (LIQUOR, liquor),
        (NA_BEV, na_bev),
        (WINE, wine),
      ]
      .into_iter()
      .map(move |(category, share)| AllocationSeed {
        period,
        category,
        sales_percent: pct(share),
      })
    };

    Self {
      meal_periods:  vec![
        PeriodSeed {
          name:  BRUNCH,
          notes: Some("Only on the weekend; replaced by Lunch during the week."),
        },
        PeriodSeed {
          name:  LUNCH,
          notes: Some("Only on weekdays; replaced by Brunch on the weekend."),
        },
        PeriodSeed { name: DINNER, notes: None },
      ],
      cat_groups:    vec![FOOD_GROUP, ALCOHOL_GROUP, RETAIL_GROUP],
      categories:    vec![
        category(FOOD, FOOD_GROUP, 35),
        category(NA_BEV, FOOD_GROUP, 10),
        category(BEER, ALCOHOL_GROUP, 15),
        category(LIQUOR, ALCOHOL_GROUP, 20),
        category(WINE, ALCOHOL_GROUP, 30),
        category(RETAIL, RETAIL_GROUP, 25),
      ],
      default_sales: vec![
        default_sale(DINNER, 3, 6000),
        default_sale(DINNER, 4, 8000),
        default_sale(LUNCH, 5, 5000),
        default_sale(DINNER, 5, 10000),
        default_sale(BRUNCH, 6, 8000),
        default_sale(DINNER, 6, 10000),
        default_sale(BRUNCH, 7, 6000),
        default_sale(DINNER, 7, 4000),
      ],
      allocations:   split(BRUNCH, 15, 50, 15, 5, 15)
        .chain(split(LUNCH, 10, 65, 5, 10, 10))
        .chain(split(DINNER, 10, 50, 10, 5, 25))
        .collect(),
    }
  }

  /// Check that every name reference resolves within the template and that
  /// each meal period's allocations add up to exactly 1.
  pub fn validate(&self) -> Result<()> {
    let periods: Vec<&str> = self.meal_periods.iter().map(|p| p.name).collect();
    let categories: Vec<&str> = self.categories.iter().map(|c| c.name).collect();

    let unknown = |what: &str, name: &str| {
      Error::Invalid(format!("seed template refers to unknown {what} {name:?}"))
    };
    for category in &self.categories {
      if !self.cat_groups.contains(&category.group) {
        return Err(unknown("category group", category.group));
      }
    }
    for sale in &self.default_sales {
      if !periods.contains(&sale.period) {
        return Err(unknown("meal period", sale.period));
      }
    }
    for allocation in &self.allocations {
      if !periods.contains(&allocation.period) {
        return Err(unknown("meal period", allocation.period));
      }
      if !categories.contains(&allocation.category) {
        return Err(unknown("category", allocation.category));
      }
    }

    for period in &periods {
      let total: Decimal = self
        .allocations
        .iter()
        .filter(|a| a.period == *period)
        .map(|a| a.sales_percent)
        .sum();
      if total != Decimal::ONE {
        return Err(Error::Invalid(format!(
          "allocations for {period} sum to {total}, not 1"
        )));
      }
    }
    Ok(())
  }
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

/// Ids of every row a bootstrap created, in template order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedSummary {
  pub meal_periods:  Vec<i64>,
  pub cat_groups:    Vec<i64>,
  pub categories:    Vec<i64>,
  pub default_sales: Vec<i64>,
  pub allocations:   Vec<i64>,
}

fn id_of(ids: &HashMap<&str, i64>, name: &str) -> Result<i64> {
  ids.get(name).copied().ok_or_else(|| {
    Error::Invalid(format!("seed template refers to unknown row {name:?}"))
  })
}

/// Seed `restaurant_id` from [`SeedTemplate::standard`].
pub fn seed(repo: &dyn Repository, restaurant_id: i64) -> Result<SeedSummary> {
  seed_with(repo, restaurant_id, &SeedTemplate::standard())
}

pub fn seed_with(
  repo: &dyn Repository,
  restaurant_id: i64,
  template: &SeedTemplate,
) -> Result<SeedSummary> {
  template.validate()?;
  let mut summary = SeedSummary::default();

  let mut period_ids = HashMap::new();
  for period in &template.meal_periods {
    let row = meal_periods::create(repo, &NewMealPeriod {
      restaurant_id,
      name: period.name.to_owned(),
      notes: period.notes.map(str::to_owned),
    })?;
    period_ids.insert(period.name, row.id);
    summary.meal_periods.push(row.id);
  }

  let mut group_ids = HashMap::new();
  for &name in &template.cat_groups {
    let row = cat_groups::create(repo, &NewCategoryGroup {
      restaurant_id,
      name: name.to_owned(),
      notes: None,
    })?;
    group_ids.insert(name, row.id);
    summary.cat_groups.push(row.id);
  }

  let mut category_ids = HashMap::new();
  for category in &template.categories {
    let row = categories::create(repo, &NewCategory {
      restaurant_id,
      name: category.name.to_owned(),
      cat_group_id: Some(id_of(&group_ids, category.group)?),
      cogs_percent: category.cogs_percent,
      notes: None,
    })?;
    category_ids.insert(category.name, row.id);
    summary.categories.push(row.id);
  }

  for sale in &template.default_sales {
    let row = default_sales::create(repo, &NewDefaultSale {
      restaurant_id,
      meal_period_id: id_of(&period_ids, sale.period)?,
      day_id: sale.day_id,
      total: sale.total,
      notes: None,
    })?;
    summary.default_sales.push(row.id);
  }

  for allocation in &template.allocations {
    let row = allocations::create(repo, &NewMealPeriodCategory {
      restaurant_id,
      meal_period_id: id_of(&period_ids, allocation.period)?,
      category_id: id_of(&category_ids, allocation.category)?,
      sales_percent_of_period: allocation.sales_percent,
      notes: None,
    })?;
    summary.allocations.push(row.id);
  }

  Ok(summary)
}
