//! Settings screen model

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    TriggerPaywall(String),
    RestorePurchases,
    ShowTutorial,
    RequestReview,
    Share(String),
    Email(String),
    OpenUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsItem {
    pub title: &'static str,
    pub icon: &'static str,
    pub action: SettingsAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSection {
    pub header: &'static str,
    pub items: Vec<SettingsItem>,
}

fn item(title: &'static str, icon: &'static str, action: SettingsAction) -> SettingsItem {
    SettingsItem {
        title,
        icon,
        action,
    }
}

/// Build the settings sections. The purchases section is only listed for premium users.
pub fn settings_sections(config: &AppConfig, is_premium_user: bool) -> Vec<SettingsSection> {
    let mut sections = Vec::with_capacity(4);

    if is_premium_user {
        sections.push(SettingsSection {
            header: "IN-APP PURCHASES",
            items: vec![
                item(
                    "Upgrade Premium",
                    "crown",
                    SettingsAction::TriggerPaywall(config.paywall_event.clone()),
                ),
                item(
                    "Restore Purchases",
                    "arrow.clockwise",
                    SettingsAction::RestorePurchases,
                ),
            ],
        });
    }

    sections.push(SettingsSection {
        header: "TUTORIAL",
        items: vec![item(
            "How to Add a Watch Face?",
            "questionmark.circle",
            SettingsAction::ShowTutorial,
        )],
    });

    sections.push(SettingsSection {
        header: "SPREAD THE WORD",
        items: vec![
            item("Rate App", "star", SettingsAction::RequestReview),
            item(
                "Share App",
                "square.and.arrow.up",
                SettingsAction::Share(config.app_url.clone()),
            ),
        ],
    });

    sections.push(SettingsSection {
        header: "SUPPORT & PRIVACY",
        items: vec![
            item(
                "E-Mail us",
                "envelope.badge",
                SettingsAction::Email(config.support_mailto()),
            ),
            item(
                "Privacy Policy",
                "hand.raised",
                SettingsAction::OpenUrl(config.privacy_url.clone()),
            ),
            item(
                "Terms of Use",
                "doc.text",
                SettingsAction::OpenUrl(config.terms_url.clone()),
            ),
        ],
    });

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(sections: &[SettingsSection]) -> Vec<&'static str> {
        sections.iter().map(|s| s.header).collect()
    }

    #[test]
    fn test_free_user_sections() {
        let sections = settings_sections(&AppConfig::default(), false);
        assert_eq!(
            headers(&sections),
            vec!["TUTORIAL", "SPREAD THE WORD", "SUPPORT & PRIVACY"]
        );
    }

    #[test]
    fn test_premium_user_sees_purchases() {
        let sections = settings_sections(&AppConfig::default(), true);
        assert_eq!(sections[0].header, "IN-APP PURCHASES");
        assert_eq!(
            sections[0].items[0].action,
            SettingsAction::TriggerPaywall("campaign_trigger".to_string())
        );
        assert_eq!(sections[0].items[1].action, SettingsAction::RestorePurchases);
        assert_eq!(sections.len(), 4);
    }

    #[test]
    fn test_links_come_from_config() {
        let config = AppConfig {
            support_email: "help@example.com".to_string(),
            terms_url: "https://example.com/terms".to_string(),
            ..AppConfig::default()
        };
        let sections = settings_sections(&config, false);
        let support = sections.last().unwrap();

        assert_eq!(
            support.items[0].action,
            SettingsAction::Email("mailto:help@example.com".to_string())
        );
        assert_eq!(
            support.items[2].action,
            SettingsAction::OpenUrl("https://example.com/terms".to_string())
        );
    }
}
