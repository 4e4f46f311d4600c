//! Demo data for local development.

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use eyre::{Result, eyre};
use paintbook_core::models::booking::BookingStatus;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::models::DbUser;
use crate::repositories::{availability, booking, painter, user};

const PAINTERS: &[(&str, &str)] = &[
    ("John Painter", "john@example.com"),
    ("Jane Painter", "jane@example.com"),
    ("Bob Painter", "bob@example.com"),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Alice Customer", "alice@example.com"),
    ("Charlie Customer", "charlie@example.com"),
];

const SEED_RATING: f64 = 4.5;
const SEED_SPECIALIZATION: &str = "Interior Painting";
const AVAILABILITY_DAYS: u64 = 7;
const SAMPLE_BOOKINGS: u64 = 3;

/// Morning and afternoon windows published for each seeded painter.
const DAILY_WINDOWS: &[((u32, u32), (u32, u32))] = &[((9, 0), (12, 0)), ((13, 0), (17, 0))];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub painters_created: usize,
    pub customers_created: usize,
    pub availabilities_created: usize,
    pub bookings_created: usize,
}

/// Seeds painters, customers, availability windows and a few bookings.
///
/// Users are matched by email, so running it again only fills in what is
/// missing. Windows and bookings are only added for painters created by this
/// run.
pub async fn seed_demo_data(pool: &Pool<Postgres>) -> Result<SeedSummary> {
    seed_demo_data_from(pool, Utc::now().date_naive()).await
}

pub async fn seed_demo_data_from(pool: &Pool<Postgres>, today: NaiveDate) -> Result<SeedSummary> {
    info!("Seeding demo data starting {}", today);
    let mut summary = SeedSummary::default();

    let mut new_painters = Vec::new();
    for (name, email) in PAINTERS {
        let (account, _) = find_or_create_user(pool, email, name, user::ROLE_PAINTER).await?;
        let (_, created) =
            painter::create_painter_profile(pool, account.id, SEED_RATING, SEED_SPECIALIZATION).await?;
        if created {
            new_painters.push(account);
        }
    }
    summary.painters_created = new_painters.len();

    let mut customers = Vec::new();
    for (name, email) in CUSTOMERS {
        let (account, created) = find_or_create_user(pool, email, name, user::ROLE_CUSTOMER).await?;
        if created {
            summary.customers_created += 1;
        }
        customers.push(account);
    }

    for account in &new_painters {
        for offset in 0..AVAILABILITY_DAYS {
            let day = add_days(today, offset)?;
            for &((start_hour, start_minute), (end_hour, end_minute)) in DAILY_WINDOWS {
                availability::create_availability(
                    pool,
                    account.id,
                    day.and_time(time(start_hour, start_minute)?).and_utc(),
                    day.and_time(time(end_hour, end_minute)?).and_utc(),
                )
                .await?;
                summary.availabilities_created += 1;
            }
        }
    }

    if new_painters.is_empty() || customers.is_empty() {
        info!("No new painters or customers, skipping sample bookings");
    } else {
        for index in 0..SAMPLE_BOOKINGS {
            let slot = index as usize;
            let painter = &new_painters[slot % new_painters.len()];
            let customer = &customers[slot % customers.len()];
            booking::create_booking(
                pool,
                painter.id,
                customer.id,
                add_days(today, index + 1)?,
                time(10, 0)?,
                time(14, 0)?,
                BookingStatus::Confirmed,
            )
            .await?;
            summary.bookings_created += 1;
        }
    }

    info!(
        "Seeding finished: {} painters, {} customers, {} availabilities, {} bookings",
        summary.painters_created,
        summary.customers_created,
        summary.availabilities_created,
        summary.bookings_created
    );
    Ok(summary)
}

async fn find_or_create_user(
    pool: &Pool<Postgres>,
    email: &str,
    name: &str,
    role: &str,
) -> Result<(DbUser, bool)> {
    if let Some(existing) = user::get_user_by_email(pool, email).await? {
        return Ok((existing, false));
    }
    Ok((user::create_user(pool, email, name, role).await?, true))
}

fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| eyre!("Date overflow adding {} days to {}", days, date))
}

fn time(hour: u32, minute: u32) -> Result<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| eyre!("Invalid time {}:{}", hour, minute))
}
