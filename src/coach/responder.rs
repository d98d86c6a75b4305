//! Keyword rules behind Coach Byte's chat replies.

/// Hour after which every message gets the late-night reply.
const NIGHT_AFTER_HOUR: u8 = 21;

pub const DEFAULT_REPLY: &str = "I hear you! Based on your patterns, I'd suggest drinking a glass of water first and waiting 10 minutes before eating. Often what feels like hunger is actually thirst or an emotional trigger. 💚";

struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

/// Checked in order; the first rule with a matching keyword answers.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["night", "late"],
        reply: "Late night cravings are real — and often tied to cortisol spikes from today's stress. Try herbal chamomile tea instead. Your body will thank you in the morning! 🌙",
    },
    Rule {
        keywords: &["stress", "anxious", "anxiety"],
        reply: "Stress eating is your body's way of seeking comfort. Before reaching for food, try 5 deep breaths. If you still want to eat after that, choose something nourishing. You've got this! 💪",
    },
    Rule {
        keywords: &["craving", "urge"],
        reply: "Cravings typically peak at 3 minutes and then fade. Set a timer — if you still want it after, have a small portion mindfully. Deprivation leads to binging. 🔮",
    },
    Rule {
        keywords: &["sugar", "sweet", "chocolate"],
        reply: "Sugar cravings? Your body might need energy or serotonin. Try a small piece of dark chocolate (70%+), a handful of dates, or a banana. Much better than processed sweets! 🍫",
    },
    Rule {
        keywords: &["help", "what can you"],
        reply: "I'm Coach Byte, your AI food discipline coach! I can help with:\n• Understanding your eating patterns\n• Managing cravings and emotional eating\n• Healthy food alternatives\n• Mindful eating techniques\n\nWhat's on your mind today? 🌱",
    },
    Rule {
        keywords: &["binge", "overeating", "overate"],
        reply: "I notice you're concerned about overeating. First — no shame! It happens to everyone. Let's talk about what triggered it and create a plan for next time. You're not your habits; you're building new ones. 💙",
    },
    Rule {
        keywords: &["weight", "fat", "lose"],
        reply: "Weight management is 80% about consistent habits, not extreme restrictions. Focus on eating slowly, stopping at 80% full, and logging with awareness. Small daily improvements lead to massive long-term change. 📈",
    },
    Rule {
        keywords: &["monday", "week"],
        reply: "Monday eating patterns are often reactive to Sunday stress. Try meal prepping Sunday evening so you start the week with healthy options already available! 🥘",
    },
    Rule {
        keywords: &["breakfast", "morning"],
        reply: "Breakfast within 1 hour of waking regulates cortisol and reduces afternoon cravings. Even something small like a banana + nuts is much better than skipping. Try it for 7 days! 🌅",
    },
];

fn base_reply(input: &str, local_hour: u8) -> &'static str {
    let lower = input.to_lowercase();
    if local_hour > NIGHT_AFTER_HOUR {
        return RULES[0].reply;
    }
    RULES
        .iter()
        .find(|r| r.keywords.iter().any(|k| lower.contains(k)))
        .map_or(DEFAULT_REPLY, |r| r.reply)
}

fn prefix(name: &str, score: u8) -> String {
    match score {
        71.. => format!("Great work, {name}! 🌟 "),
        0..=39 => format!("No worries, {name} — progress, not perfection. "),
        _ => String::new(),
    }
}

/// Reply to `input` for a user called `name` with discipline `score`.
pub fn respond(input: &str, name: &str, score: u8, local_hour: u8) -> String {
    prefix(name, score) + base_reply(input, local_hour)
}

pub fn greeting(name: &str) -> String {
    format!(
        "Hey {name}! 👋 I'm Coach Byte, your personal food discipline AI. I'm here to help you build conscious eating habits — not with shame, but with science and compassion.\n\nHow are you feeling today? What's on your mind?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earlier_rules_win() {
        let reply = respond("I'm stressed and want something sweet", "Asha", 50, 10);
        assert!(reply.starts_with("Stress eating"));
    }

    #[test]
    fn late_hour_forces_night_reply() {
        assert!(respond("what should I eat for breakfast", "Asha", 50, 22).starts_with("Late night"));
        assert!(respond("what should I eat for breakfast", "Asha", 50, 21).starts_with("Breakfast"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(respond("CHOCOLATE please", "Asha", 50, 9).starts_with("Sugar cravings?"));
        assert!(respond("What can you do?", "Asha", 50, 9).starts_with("I'm Coach Byte"));
    }

    #[test]
    fn unmatched_input_gets_default() {
        assert_eq!(respond("hello", "Asha", 50, 9), DEFAULT_REPLY);
    }

    #[test]
    fn prefix_depends_on_score() {
        assert!(respond("hello", "Asha", 71, 9).starts_with("Great work, Asha! 🌟 I hear you"));
        assert!(respond("hello", "Asha", 39, 9).starts_with("No worries, Asha — progress, not perfection. "));
        assert_eq!(respond("hello", "Asha", 70, 9), DEFAULT_REPLY);
        assert_eq!(respond("hello", "Asha", 40, 9), DEFAULT_REPLY);
    }
}
