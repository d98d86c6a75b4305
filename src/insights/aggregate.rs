//! Pure statistics over a user's meals and badges.
//!
//! Every function takes the reference instant explicitly; "today" and weekday
//! buckets are computed in [`LOCAL_OFFSET`](crate::clock::LOCAL_OFFSET).

use std::collections::BTreeMap;

use serde::Serialize;
use time::{Date, Duration, OffsetDateTime};

use crate::clock::{local_date, start_of_local_day};
use crate::meals::repo_types::MealRecord;

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn today_meals(meals: &[MealRecord], now: OffsetDateTime) -> Vec<&MealRecord> {
    let start = start_of_local_day(now);
    meals.iter().filter(|m| m.timestamp >= start).collect()
}

pub fn today_calories(meals: &[MealRecord], now: OffsetDateTime) -> u32 {
    today_meals(meals, now).iter().map(|m| m.calories).sum()
}

/// Meals in the trailing 7×24h window.
pub fn weekly_meals(meals: &[MealRecord], now: OffsetDateTime) -> Vec<&MealRecord> {
    let since = now - Duration::days(7);
    meals.iter().filter(|m| m.timestamp >= since).collect()
}

/// Count and rounded share of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Share<K> {
    pub key: K,
    pub count: usize,
    pub percent: u32,
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}

/// Groups `meals` by `key`, in the key's order. Shares are not forced to sum to 100.
pub fn distribution<K, F>(meals: &[&MealRecord], key: F) -> Vec<Share<K>>
where
    K: Ord + Copy,
    F: Fn(&MealRecord) -> K,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for m in meals {
        *counts.entry(key(m)).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(key, count)| Share {
            key,
            count,
            percent: percent(count, meals.len()),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BadgeProgress {
    pub earned: usize,
    pub total: usize,
    pub ratio: f64,
    pub percent: u32,
}

pub fn badge_progress(earned: usize, total: usize) -> BadgeProgress {
    let ratio = if total == 0 {
        0.0
    } else {
        earned as f64 / total as f64
    };
    BadgeProgress {
        earned,
        total,
        ratio,
        percent: percent(earned, total),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCalories {
    pub day: &'static str,
    pub date: Date,
    pub calories: u32,
}

/// Sun..Sat buckets; each holds the most recent date with that weekday, today included.
pub fn weekly_calories_by_day(weekly: &[&MealRecord], now: OffsetDateTime) -> [DayCalories; 7] {
    let today = local_date(now);
    let today_idx = i64::from(today.weekday().number_days_from_sunday());
    std::array::from_fn(|i| {
        let back = (today_idx - i as i64).rem_euclid(7);
        let date = today - Duration::days(back);
        let calories = weekly
            .iter()
            .filter(|m| local_date(m.timestamp) == date)
            .map(|m| m.calories)
            .sum();
        DayCalories {
            day: DAY_NAMES[i],
            date,
            calories,
        }
    })
}

pub fn average_calories(weekly: &[&MealRecord]) -> u32 {
    if weekly.is_empty() {
        return 0;
    }
    let sum: u64 = weekly.iter().map(|m| u64::from(m.calories)).sum();
    (sum as f64 / weekly.len() as f64).round() as u32
}

pub fn emotional_eating_pct(weekly: &[&MealRecord]) -> u32 {
    let emotional = weekly.iter().filter(|m| m.eating_reason.is_emotional()).count();
    percent(emotional, weekly.len())
}

pub fn pattern_insight(emotional_pct: u32) -> String {
    if emotional_pct > 40 {
        format!(
            "You've been eating emotionally {emotional_pct}% of the time this week. Stress is the main trigger. Try the 5-breath technique before meals! 💙"
        )
    } else if emotional_pct > 20 {
        format!(
            "{emotional_pct}% emotional eating this week — improving! Hunger is becoming your dominant eating cue. Keep it up! 🌱"
        )
    } else {
        format!(
            "Excellent! {}% of your meals are hunger-driven this week. You're building real food discipline! ⭐",
            100u32.saturating_sub(emotional_pct)
        )
    }
}

pub fn greeting(local_hour: u8) -> &'static str {
    match local_hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        17..=20 => "Good evening",
        _ => "Good night",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

pub fn score_band(score: u8) -> ScoreBand {
    match score {
        75.. => ScoreBand::High,
        50..=74 => ScoreBand::Medium,
        _ => ScoreBand::Low,
    }
}
