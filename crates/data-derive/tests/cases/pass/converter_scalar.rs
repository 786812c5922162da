// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use data_derive::data_schema;

#[data_schema]
mod stats {
    use data_derive::Converter;

    #[derive(Debug, PartialEq)]
    pub struct FloatWrapper(pub f32);

    #[derive(Default)]
    pub struct Wrap;

    impl Converter<f32> for Wrap {
        type Output = FloatWrapper;

        fn convert(&self, raw: &f32) -> FloatWrapper {
            FloatWrapper(*raw)
        }
    }

    #[data]
    pub struct Stat {
        #[data(converter = Wrap)]
        _hp: f32,
        _name: String
    }

    impl Stat {
        pub fn new(hp: f32, name: &str) -> Self {
            Self {
                _hp:   hp,
                _name: name.to_string()
            }
        }
    }
}

fn main() {
    let stat = stats::Stat::new(12.5, "hp");
    assert_eq!(stat.hp(), stats::FloatWrapper(12.5));
    assert_eq!(stat.name(), "hp");
}
