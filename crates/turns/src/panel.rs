//! The default cast of the show.

use crate::error::Result;
use crate::speaker::{Speaker, SpeakerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Moderator,
    Panelist,
}

/// Text-to-speech settings. `rate` and `pitch` are playback multipliers.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub voice_id: &'static str,
    pub rate: f32,
    pub pitch: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Panelist {
    pub id: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub image: &'static str,
    pub color: &'static str,
    pub role: Role,
    pub short_bio: &'static str,
    pub voice: Voice,
    pub reactions: [&'static str; 3],
}

impl Panelist {
    pub fn speaker(&self) -> Speaker {
        Speaker::new(self.id, self.emoji, self.name)
    }
}

pub const PANELISTS: [Panelist; 5] = [
    Panelist {
        id: "yoo-jaesuk",
        name: "유재석",
        emoji: "🎙️",
        image: "https://upload.wikimedia.org/wikipedia/commons/thumb/3/30/Yoo_Jae_Suk_going_to_work_at_Happy_Together_on_August_19%2C_2017_%281%29.jpg/400px-Yoo_Jae_Suk_going_to_work_at_Happy_Together_on_August_19%2C_2017_%281%29.jpg",
        color: "#F59E0B",
        role: Role::Moderator,
        short_bio: "국민MC, 고민뭐하니 진행자",
        voice: Voice {
            voice_id: "zwGt6D9wSkOlAC9EfLUN",
            rate: 1.1,
            pitch: 1.1,
        },
        reactions: ["😄", "👏", "🎉"],
    },
    Panelist {
        id: "chimchakman",
        name: "침착맨",
        emoji: "😎",
        image: "https://upload.wikimedia.org/wikipedia/commons/thumb/e/e2/%EB%B0%B0%EC%84%B1%EC%9E%AC%EC%9D%98_%ED%85%90_%EC%B6%9C%EC%97%B0_%EC%B9%A8%EC%B0%A9%EB%A7%A8.jpg/400px-%EB%B0%B0%EC%84%B1%EC%9E%AC%EC%9D%98_%ED%85%90_%EC%B6%9C%EC%97%B0_%EC%B9%A8%EC%B0%A9%EB%A7%A8.jpg",
        color: "#22C55E",
        role: Role::Panelist,
        short_bio: "만화가·유튜버, 침착한 논리왕",
        voice: Voice {
            voice_id: "g14YnDYCsy3k7XLlcKlO",
            rate: 0.95,
            pitch: 0.85,
        },
        reactions: ["🧐", "😂", "🎮"],
    },
    Panelist {
        id: "son-heungmin",
        name: "손흥민",
        emoji: "⚽",
        image: "https://upload.wikimedia.org/wikipedia/commons/thumb/b/b0/BFA_2023_-2_Heung-Min_Son_%28cropped%29.jpg/400px-BFA_2023_-2_Heung-Min_Son_%28cropped%29.jpg",
        color: "#3B82F6",
        role: Role::Panelist,
        short_bio: "토트넘 주장, 아시아 최고의 축구선수",
        voice: Voice {
            voice_id: "y0s2ExEMuum3muUnA6Zd",
            rate: 1.0,
            pitch: 1.0,
        },
        reactions: ["💪", "⚡", "👍"],
    },
    Panelist {
        id: "elon-musk",
        name: "일론 머스크",
        emoji: "🚀",
        image: "https://upload.wikimedia.org/wikipedia/commons/thumb/5/5e/Elon_Musk_-_54820081119_%28cropped%29.jpg/400px-Elon_Musk_-_54820081119_%28cropped%29.jpg",
        color: "#06B6D4",
        role: Role::Panelist,
        short_bio: "Tesla·SpaceX CEO, 제1원리 사고",
        voice: Voice {
            voice_id: "NIS6mYGxVFNZaeq5OSC1",
            rate: 1.1,
            pitch: 0.9,
        },
        reactions: ["🚀", "🤯", "💥"],
    },
    Panelist {
        id: "lee-youngji",
        name: "이영지",
        emoji: "🎤",
        image: "https://upload.wikimedia.org/wikipedia/commons/thumb/7/7f/Lee_Young-ji_in_April_2025.png/400px-Lee_Young-ji_in_April_2025.png",
        color: "#EC4899",
        role: Role::Panelist,
        short_bio: "래퍼·예능인, MZ세대 아이콘",
        voice: Voice {
            voice_id: "iwP1PxYYSTdHA1qXlwFe",
            rate: 1.2,
            pitch: 1.3,
        },
        reactions: ["🔊", "💯", "🤣"],
    },
];

pub fn panelist(id: &str) -> Option<&'static Panelist> {
    PANELISTS.iter().find(|p| p.id == id)
}

pub fn panel_registry() -> Result<SpeakerRegistry> {
    SpeakerRegistry::new(PANELISTS.iter().map(Panelist::speaker).collect())
}
