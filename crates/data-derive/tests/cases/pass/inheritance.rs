// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use data_derive::{Data, ReadView, data_schema};

#[data_schema(crate = "::data_derive")]
mod heroes {
    #[data]
    pub struct Hero {
        _multipliers: Vec<u32>
    }

    #[data(base = "Hero")]
    pub struct NewHero {
        _new_values: Vec<i32>
    }

    #[data(base = "NewHero")]
    pub struct LegendHero {
        _title: String
    }

    impl LegendHero {
        pub fn new() -> Self {
            Self {
                _multipliers: vec![2, 3],
                _new_values:  vec![-1],
                _title:       "legend".to_string()
            }
        }
    }
}

fn main() {
    let hero = heroes::LegendHero::new();
    let multipliers: ReadView<'_, u32> = hero.multipliers();

    assert_eq!(multipliers, [2, 3]);
    assert_eq!(hero.new_values().len(), 1);
    assert_eq!(hero.title(), "legend");
    assert_eq!(
        <heroes::LegendHero as Data>::ACCESSORS,
        &["Multipliers", "NewValues", "Title"]
    );
}
