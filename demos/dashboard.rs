//! Seeded demo: boots the core with the demo dataset and prints the
//! numbers each portal's dashboard would show.
//!
//! ```bash
//! cargo run --example dashboard --features fixtures
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use educrm_core::domain::{Actor, UserRole};
use educrm_core::infra::AppState;
use educrm_core::services::{ServiceContainer, Services};
use educrm_core::{fixtures, metrics};

#[tokio::main]
async fn main() -> educrm_core::AppResult<()> {
    init_tracing();

    let state = AppState::from_store(fixtures::demo_store());
    let actor = Actor::new(Uuid::new_v4(), "Admin User", UserRole::Admin);
    let services = Services::from_state(state, actor);

    let admin = services.admin();
    let teaching = services.teaching();
    let rewards = services.rewards();

    println!("== Groups ==");
    for group in teaching.list_groups().await? {
        let rate = teaching.group_attendance_rate(group.id).await?;
        let avg = teaching.group_average_points(group.id).await?;
        println!(
            "{:<12} {} students, attendance {}%, avg points {}",
            group.name,
            metrics::occupancy(&group),
            rate,
            avg
        );
    }

    println!("\n== Students ==");
    for student in admin.list_students().await? {
        let balance = rewards.total_points(student.id).await?;
        println!("{:<16} {} points", student.name, balance);
    }

    let payments = admin.list_payments().await?;
    println!("\nTotal revenue: {}", metrics::total_revenue(&payments));

    // spend some of Alice's points in the shop
    if let Some(alice) = admin
        .list_students()
        .await?
        .into_iter()
        .find(|s| s.name.starts_with("Alice"))
    {
        rewards.spend_points(alice.id, 3, "Sticker Pack").await?;
        println!(
            "\nAfter Alice buys a Sticker Pack: {} points",
            rewards.total_points(alice.id).await?
        );
        for entry in rewards.history(alice.id).await? {
            println!("  {:>4}  {}", entry.points_change, entry.message);
        }
    }

    println!("\n== Recent admin activity ==");
    for activity in admin.recent_activity().await? {
        println!("- {}", activity.message);
    }

    Ok(())
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
