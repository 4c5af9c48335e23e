//! Demo fixtures for the seed endpoints and the `seed-data` command.
//!
//! Seeding always wipes every table first and restarts the id sequences, so
//! running it twice leaves the database in the same shape.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::info;

use crate::repos::invoice_repository::generate_invoice_number;
use crate::types::{now_rfc3339, DatabaseResult};

/// Tables in an order that satisfies foreign keys when deleting.
pub const TABLES: &[&str] = &[
    "ai_chat_messages",
    "ai_chats",
    "ai_generated_content",
    "automation_rules",
    "reports",
    "social_media_integrations",
    "user_preferences",
    "rewards",
    "payments",
    "invoice_items",
    "invoices",
    "notifications",
    "comments",
    "posts",
    "analytics",
    "ads",
    "campaigns",
    "clients",
    "users",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Users, clients, campaigns, ads, posts, invoices and notifications
    Basic,
    /// Everything in `Basic` plus analytics history, AI data, integrations and automation
    Advanced,
}

/// Row counts per table after a seed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub counts: BTreeMap<String, i64>,
}

impl SeedReport {
    pub fn total_rows(&self) -> i64 {
        self.counts.values().sum()
    }
}

/// Delete every row and reset the id sequences.
pub async fn clear_all(pool: &SqlitePool) -> DatabaseResult<()> {
    let mut tx = pool.begin().await?;
    wipe(&mut tx).await?;
    tx.commit().await?;
    info!("database cleared");
    Ok(())
}

/// Wipe the database and load the fixtures for `mode`.
pub async fn seed(pool: &SqlitePool, mode: SeedMode) -> DatabaseResult<SeedReport> {
    let mut tx = pool.begin().await?;
    wipe(&mut tx).await?;

    seed_basic(&mut tx).await?;
    if mode == SeedMode::Advanced {
        seed_advanced(&mut tx).await?;
    }

    tx.commit().await?;

    let report = SeedReport {
        counts: table_counts(pool).await?,
    };
    info!(?mode, rows = report.total_rows(), "database seeded");
    Ok(report)
}

/// Current row count of every application table.
pub async fn table_counts(pool: &SqlitePool) -> DatabaseResult<BTreeMap<String, i64>> {
    let mut counts = BTreeMap::new();
    for table in TABLES {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?;
        counts.insert((*table).to_string(), count);
    }
    Ok(counts)
}

async fn wipe(tx: &mut Transaction<'_, Sqlite>) -> DatabaseResult<()> {
    for table in TABLES {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut **tx)
            .await?;
    }
    sqlx::query("DELETE FROM sqlite_sequence")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

fn days_ago(days: i64) -> String {
    (Utc::now().date_naive() - Duration::days(days)).to_string()
}

fn days_ahead(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days)).to_string()
}

async fn seed_basic(tx: &mut Transaction<'_, Sqlite>) -> DatabaseResult<()> {
    let now = now_rfc3339();

    for (id, name, email, role) in [
        (1_i64, "مدير النظام", "admin@adpulse.local", "admin"),
        (2, "Sara Al-Harbi", "sara@adpulse.local", "user"),
    ] {
        sqlx::query(
            "INSERT INTO users (id, name, email, role, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(role)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    let clients = [
        ("شركة النخبة للتجارة", "info@nokhba.example", "+966500000001", "retail", "active"),
        ("Najd Foods", "hello@najd.example", "+966500000002", "food", "active"),
        ("Tech Vision", "contact@techvision.example", "+966500000003", "technology", "prospect"),
    ];
    for (name, email, phone, industry, status) in clients {
        sqlx::query(
            "INSERT INTO clients (user_id, name, email, phone, company, industry, status, created_at, updated_at)
             VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(name)
        .bind(industry)
        .bind(status)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    let campaigns = [
        (1_i64, "حملة رمضان", "active", "instagram", "awareness", 15000.0, 6200.0),
        (2, "Summer Menu Launch", "active", "facebook", "conversions", 8000.0, 3100.0),
        (3, "Product Teaser", "draft", "linkedin", "leads", 5000.0, 0.0),
    ];
    for (client_id, name, status, platform, objective, budget, spent) in campaigns {
        sqlx::query(
            "INSERT INTO campaigns (user_id, client_id, name, description, status, platform, objective, budget, spent, start_date, end_date, target_audience, is_archived, created_at, updated_at)
             VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, false, ?, ?)",
        )
        .bind(client_id)
        .bind(name)
        .bind(format!("{name} ({platform})"))
        .bind(status)
        .bind(platform)
        .bind(objective)
        .bind(budget)
        .bind(spent)
        .bind(days_ago(30))
        .bind(days_ahead(30))
        .bind("18-35, Saudi Arabia")
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    let ads = [
        (1_i64, "عروض رمضان", "خصم 30% على جميع المنتجات", "instagram", "image", "active", 42000, 1300, 85),
        (1, "Ramadan Stories", "Daily offers during the holy month", "instagram", "video", "active", 28000, 900, 40),
        (2, "Summer Dishes", "Fresh summer menu now available", "facebook", "carousel", "active", 31000, 760, 52),
        (3, "Coming Soon", "Something new is on the way", "linkedin", "image", "draft", 0, 0, 0),
    ];
    for (campaign_id, title, content, platform, ad_type, status, impressions, clicks, conversions) in ads {
        sqlx::query(
            "INSERT INTO ads (campaign_id, title, content, platform, ad_type, status, impressions, clicks, conversions, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(campaign_id)
        .bind(title)
        .bind(content)
        .bind(platform)
        .bind(ad_type)
        .bind(status)
        .bind(impressions)
        .bind(clicks)
        .bind(conversions)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    let posts = [
        (Some(1_i64), "رمضان كريم", "كل عام وأنتم بخير من فريقنا", "instagram", "published", 320, 45, 0),
        (Some(2), "New summer menu", "Come try our new dishes this weekend", "facebook", "scheduled", 0, 0, 0),
        (None, "Hiring", "We are looking for a social media specialist", "linkedin", "draft", 0, 0, 0),
    ];
    for (campaign_id, title, content, platform, status, likes, shares, comments_count) in posts {
        let published_at = (status == "published").then(|| now.clone());
        let scheduled_at = (status == "scheduled").then(|| days_ahead(3));
        sqlx::query(
            "INSERT INTO posts (user_id, campaign_id, title, content, platform, status, scheduled_at, published_at, likes, shares, comments_count, created_at, updated_at)
             VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(campaign_id)
        .bind(title)
        .bind(content)
        .bind(platform)
        .bind(status)
        .bind(scheduled_at)
        .bind(published_at)
        .bind(likes)
        .bind(shares)
        .bind(comments_count)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    let notifications = [
        ("campaign", "الحملة نشطة", "تم تفعيل حملة رمضان بنجاح", Some("/campaigns/1"), false),
        ("invoice", "Invoice sent", "Invoice for Najd Foods was sent", Some("/invoices/2"), false),
        ("info", "Welcome", "Welcome to AdPulse", None, true),
    ];
    for (kind, title, message, link, is_read) in notifications {
        sqlx::query(
            "INSERT INTO notifications (user_id, type, title, message, link, is_read, created_at) VALUES (1, ?, ?, ?, ?, ?, ?)",
        )
        .bind(kind)
        .bind(title)
        .bind(message)
        .bind(link)
        .bind(is_read)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    let invoices: [(i64, &str, f64, &[(&str, f64, f64)]); 2] = [
        (1, "paid", 0.15, &[("إدارة حملة رمضان", 1.0, 6000.0), ("تصميم إعلانات", 4.0, 500.0)]),
        (2, "sent", 0.15, &[("Social media management", 1.0, 3500.0)]),
    ];
    for (client_id, status, tax_rate, items) in invoices {
        let subtotal: f64 = items.iter().map(|(_, quantity, price)| quantity * price).sum();
        let tax = subtotal * tax_rate;
        let result = sqlx::query(
            "INSERT INTO invoices (user_id, client_id, invoice_number, status, issue_date, due_date, subtotal, tax, total, created_at, updated_at)
             VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(client_id)
        .bind(generate_invoice_number())
        .bind(status)
        .bind(days_ago(20))
        .bind(days_ahead(10))
        .bind(subtotal)
        .bind(tax)
        .bind(subtotal + tax)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
        let invoice_id = result.last_insert_rowid();

        for (description, quantity, unit_price) in items {
            sqlx::query(
                "INSERT INTO invoice_items (invoice_id, description, quantity, unit_price, total) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(invoice_id)
            .bind(*description)
            .bind(*quantity)
            .bind(*unit_price)
            .bind(quantity * unit_price)
            .execute(&mut **tx)
            .await?;
        }

        if status == "paid" {
            sqlx::query(
                "INSERT INTO payments (invoice_id, user_id, amount, method, status, transaction_id, paid_at, created_at)
                 VALUES (?, 1, ?, 'bank_transfer', 'completed', ?, ?, ?)",
            )
            .bind(invoice_id)
            .bind(subtotal + tax)
            .bind(format!("TXN-{invoice_id:05}"))
            .bind(&now)
            .bind(&now)
            .execute(&mut **tx)
            .await?;
        }
    }

    sqlx::query(
        "INSERT INTO user_preferences (user_id, created_at, updated_at) VALUES (1, ?, ?)",
    )
    .bind(&now)
    .bind(&now)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

async fn seed_advanced(tx: &mut Transaction<'_, Sqlite>) -> DatabaseResult<()> {
    let now = now_rfc3339();

    // Two weeks of daily metrics for each live campaign
    for campaign_id in [1_i64, 2] {
        for day in 0..14_i64 {
            let impressions = 2000 + day * 150 + campaign_id * 300;
            let clicks = impressions / 40;
            let conversions = clicks / 15;
            let spend = 180.0 + day as f64 * 12.5;
            sqlx::query(
                "INSERT INTO analytics (campaign_id, date, impressions, clicks, conversions, spend, revenue, created_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(campaign_id)
            .bind(days_ago(14 - day))
            .bind(impressions)
            .bind(clicks)
            .bind(conversions)
            .bind(spend)
            .bind(spend * 2.4)
            .bind(&now)
            .execute(&mut **tx)
            .await?;
        }
    }

    for (author, content) in [("نورة", "عروض رائعة!"), ("Khalid", "Is this available in Jeddah?")] {
        sqlx::query(
            "INSERT INTO comments (post_id, user_id, author_name, content, created_at) VALUES (1, 1, ?, ?, ?)",
        )
        .bind(author)
        .bind(content)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }
    sqlx::query("UPDATE posts SET comments_count = 2 WHERE id = 1")
        .execute(&mut **tx)
        .await?;

    for (title, points, reward_type, status) in [
        ("أول حملة ناجحة", 100_i64, "achievement", "claimed"),
        ("10 Published posts", 50, "bonus", "available"),
        ("Early adopter", 200, "badge", "available"),
    ] {
        let claimed_at = (status == "claimed").then(|| now.clone());
        sqlx::query(
            "INSERT INTO rewards (user_id, title, points, reward_type, status, claimed_at, created_at) VALUES (1, ?, ?, ?, ?, ?, ?)",
        )
        .bind(title)
        .bind(points)
        .bind(reward_type)
        .bind(status)
        .bind(claimed_at)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    let chat = sqlx::query(
        "INSERT INTO ai_chats (user_id, title, created_at, updated_at) VALUES (1, 'أفكار حملة الصيف', ?, ?)",
    )
    .bind(&now)
    .bind(&now)
    .execute(&mut **tx)
    .await?;
    let chat_id = chat.last_insert_rowid();
    for (role, content) in [
        ("user", "اقترح أفكاراً لحملة صيفية لمطعم"),
        ("assistant", "يمكنك التركيز على الأطباق الباردة والعروض العائلية في عطلة نهاية الأسبوع."),
    ] {
        sqlx::query(
            "INSERT INTO ai_chat_messages (chat_id, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(chat_id)
        .bind(role)
        .bind(content)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    for (campaign_id, content_type, platform, prompt, content) in [
        (Some(1_i64), "ad", "instagram", "إعلان رمضان", "إعلان ذكي مولّد تلقائيًا لمنصة instagram"),
        (Some(2), "copy", "facebook", "Summer menu", "Fresh flavours for hot days. Order now!"),
        (None, "design", "instagram", "Square banner", "https://placehold.co/1080x1080"),
    ] {
        sqlx::query(
            "INSERT INTO ai_generated_content (user_id, campaign_id, content_type, platform, prompt, content, created_at)
             VALUES (1, ?, ?, ?, ?, ?, ?)",
        )
        .bind(campaign_id)
        .bind(content_type)
        .bind(platform)
        .bind(prompt)
        .bind(content)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    for (platform, account_name, is_connected) in [
        ("instagram", "@adpulse.demo", true),
        ("facebook", "AdPulse Demo", true),
        ("x", "@adpulse", false),
    ] {
        let connected_at = is_connected.then(|| now.clone());
        sqlx::query(
            "INSERT INTO social_media_integrations (user_id, platform, account_name, is_connected, connected_at, created_at, updated_at)
             VALUES (1, ?, ?, ?, ?, ?, ?)",
        )
        .bind(platform)
        .bind(account_name)
        .bind(is_connected)
        .bind(connected_at)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    sqlx::query(
        "INSERT INTO reports (user_id, campaign_id, title, report_type, data, created_at) VALUES (1, 1, ?, 'performance', ?, ?)",
    )
    .bind("تقرير أداء حملة رمضان")
    .bind(r#"{"ctr":3.1,"roas":2.4,"conversions":125}"#)
    .bind(&now)
    .execute(&mut **tx)
    .await?;

    for (campaign_id, name, trigger_type, action_type, config, is_active) in [
        (Some(1_i64), "Pause on overspend", "budget_threshold", "pause_campaign", r#"{"threshold":0.9}"#, true),
        (None, "Weekly report", "schedule", "send_report", r#"{"cron":"0 9 * * 0"}"#, false),
    ] {
        sqlx::query(
            "INSERT INTO automation_rules (user_id, campaign_id, name, trigger_type, action_type, config, is_active, created_at, updated_at)
             VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(campaign_id)
        .bind(name)
        .bind(trigger_type)
        .bind(action_type)
        .bind(config)
        .bind(is_active)
        .bind(&now)
        .bind(&now)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{CampaignRepository, InvoiceRepository, ReportRepository};
    use crate::test_support::test_pool;
    use crate::entities::CampaignFilter;

    #[tokio::test]
    async fn test_seed_twice_yields_identical_counts() {
        let pool = test_pool().await;

        let first = seed(&pool, SeedMode::Basic).await.unwrap();
        let second = seed(&pool, SeedMode::Basic).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.counts["users"], 2);
        assert_eq!(first.counts["campaigns"], 3);
        assert_eq!(first.counts["analytics"], 0);
    }

    #[tokio::test]
    async fn test_ids_restart_after_wipe() {
        let pool = test_pool().await;
        seed(&pool, SeedMode::Basic).await.unwrap();
        seed(&pool, SeedMode::Basic).await.unwrap();

        let campaigns = CampaignRepository::new(pool)
            .list(&CampaignFilter::default())
            .await
            .unwrap();
        let mut ids: Vec<i64> = campaigns.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_advanced_adds_history() {
        let pool = test_pool().await;
        let basic = seed(&pool, SeedMode::Basic).await.unwrap();
        let advanced = seed(&pool, SeedMode::Advanced).await.unwrap();

        assert!(advanced.total_rows() > basic.total_rows());
        assert_eq!(advanced.counts["analytics"], 28);
        assert_eq!(advanced.counts["users"], basic.counts["users"]);

        let reports = ReportRepository::new(pool).list_for_user(1).await.unwrap();
        assert_eq!(reports[0].data.as_ref().unwrap().0["roas"], 2.4);
    }

    #[tokio::test]
    async fn test_seeded_invoice_totals_include_tax() {
        let pool = test_pool().await;
        seed(&pool, SeedMode::Basic).await.unwrap();

        let invoice = InvoiceRepository::new(pool).get_with_items(1).await.unwrap();
        assert_eq!(invoice.invoice.subtotal, 8000.0);
        assert!((invoice.invoice.total - 9200.0).abs() < 1e-6);
        assert_eq!(invoice.items.len(), 2);
    }

    #[tokio::test]
    async fn test_clear_all_empties_every_table() {
        let pool = test_pool().await;
        seed(&pool, SeedMode::Advanced).await.unwrap();
        clear_all(&pool).await.unwrap();

        let counts = table_counts(&pool).await.unwrap();
        assert!(counts.values().all(|count| *count == 0));
        assert_eq!(counts.len(), TABLES.len());
    }
}
