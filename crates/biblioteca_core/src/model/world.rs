//! Adventure world demo records and their fixed sample rows.

/// Row of the `heroes` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hero {
    pub hero_id: i64,
    pub name: &'static str,
    pub class: &'static str,
    pub level: i64,
    pub race: &'static str,
}

/// Row of the `monsters` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monster {
    pub monster_id: i64,
    pub name: &'static str,
    pub kind: &'static str,
    pub hit_points: i64,
    pub danger: &'static str,
}

/// Row of the `missions` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mission {
    pub mission_id: i64,
    pub name: &'static str,
    pub description: &'static str,
    pub gold_reward: i64,
    pub difficulty: &'static str,
    /// ISO-8601 date.
    pub start_date: &'static str,
    pub status: &'static str,
}

/// A hero taking part in a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Participation {
    pub mission_id: i64,
    pub hero_id: i64,
    pub role: &'static str,
    pub hero_state: &'static str,
}

/// Monsters met during a mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encounter {
    pub mission_id: i64,
    pub monster_id: i64,
    pub quantity: i64,
}

/// One line of the mission report join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionReportRow {
    pub mission: String,
    pub hero: String,
    pub role: String,
    pub monster: String,
    pub quantity: i64,
}

pub const SAMPLE_HEROES: &[Hero] = &[
    Hero {
        hero_id: 1,
        name: "Aura",
        class: "Paladin",
        level: 10,
        race: "Human",
    },
    Hero {
        hero_id: 2,
        name: "Gimli",
        class: "Warrior",
        level: 8,
        race: "Dwarf",
    },
    Hero {
        hero_id: 3,
        name: "Lyra",
        class: "Mage",
        level: 9,
        race: "Elf",
    },
];

pub const SAMPLE_MONSTERS: &[Monster] = &[
    Monster {
        monster_id: 101,
        name: "Great Goblin",
        kind: "Goblin",
        hit_points: 50,
        danger: "Medium",
    },
    Monster {
        monster_id: 102,
        name: "Winged Shadow",
        kind: "Spectral",
        hit_points: 80,
        danger: "High",
    },
    Monster {
        monster_id: 103,
        name: "Skeleton King",
        kind: "Undead",
        hit_points: 300,
        danger: "Boss",
    },
];

pub const SAMPLE_MISSIONS: &[Mission] = &[
    Mission {
        mission_id: 501,
        name: "Amulet Rescue",
        description: "Recover an amulet stolen by goblins.",
        gold_reward: 500,
        difficulty: "Easy",
        start_date: "2025-11-01",
        status: "Completed",
    },
    Mission {
        mission_id: 502,
        name: "Dragon Hunt",
        description: "Slay a dragon in the mountains.",
        gold_reward: 5000,
        difficulty: "Epic",
        start_date: "2025-11-05",
        status: "In Progress",
    },
];

pub const SAMPLE_PARTICIPATIONS: &[Participation] = &[
    Participation {
        mission_id: 501,
        hero_id: 1,
        role: "Leader",
        hero_state: "Active",
    },
    Participation {
        mission_id: 501,
        hero_id: 2,
        role: "Defense",
        hero_state: "Active",
    },
    Participation {
        mission_id: 502,
        hero_id: 1,
        role: "Leader",
        hero_state: "Active",
    },
    Participation {
        mission_id: 502,
        hero_id: 3,
        role: "Magic Support",
        hero_state: "Active",
    },
];

pub const SAMPLE_ENCOUNTERS: &[Encounter] = &[
    Encounter {
        mission_id: 501,
        monster_id: 101,
        quantity: 5,
    },
    Encounter {
        mission_id: 502,
        monster_id: 102,
        quantity: 10,
    },
    Encounter {
        mission_id: 502,
        monster_id: 103,
        quantity: 1,
    },
];
