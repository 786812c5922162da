// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime behaviour of generated accessors.

use std::collections::VecDeque;

use data_derive::{Data, ReadView, data_schema};

#[data_schema]
mod heroes {
    use data_derive::Converter;

    #[derive(Debug, Clone, Copy, PartialEq)]
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
    #[derive(Debug, Clone, PartialEq)]
    pub struct Stat {
        #[data(converter = Wrap)]
        _hp: f32,
        #[data(converter = Wrap)]
        _atk: f32
    }

    impl Stat {
        pub fn new(hp: f32, atk: f32) -> Self {
            Self {
                _hp:  hp,
                _atk: atk
            }
        }
    }

    #[data]
    pub struct Hero {
        _multipliers: Vec<Stat>
    }

    impl Hero {
        pub fn new(multipliers: Vec<Stat>) -> Self {
            Self {
                _multipliers: multipliers
            }
        }
    }

    #[data(base = "Hero")]
    pub struct NewHero {
        _new_values: Vec<i32>
    }

    impl NewHero {
        pub fn new(multipliers: Vec<Stat>, new_values: Vec<i32>) -> Self {
            Self {
                _multipliers: multipliers,
                _new_values:  new_values
            }
        }
    }
}

#[data_schema(crate = "::data_derive")]
mod counters {
    use std::collections::VecDeque;

    #[data(mutable)]
    pub struct Counter {
        value: i32,
        #[data(policy = "read_only")]
        id: u32,
        history: VecDeque<i32>
    }

    impl Counter {
        pub fn new(id: u32) -> Self {
            Self {
                value: 0,
                id,
                history: VecDeque::new()
            }
        }

        pub fn bump(&mut self) {
            self.history.push_back(self.value);
            self.value += 1;
        }
    }

    #[data(base = "Counter")]
    pub struct FrozenCounter {}

    impl FrozenCounter {
        pub fn from_counter(counter: Counter) -> Self {
            Self {
                value:   counter.value,
                id:      counter.id,
                history: counter.history
            }
        }
    }
}

#[data_schema]
mod generic {
    #[data]
    pub struct GenericData<T> {
        _value: T
    }

    impl<T> GenericData<T> {
        pub fn new(value: T) -> Self {
            Self {
                _value: value
            }
        }
    }

    #[data(base = "GenericData<i32>")]
    pub struct IntData {
        _extra: u8
    }

    impl IntData {
        pub fn new(value: i32, extra: u8) -> Self {
            Self {
                _value: value,
                _extra: extra
            }
        }
    }
}

#[data_schema(decorations(serde))]
mod players {
    #[data(mutable)]
    #[derive(serde::Serialize)]
    pub struct Player {
        /// Current level.
        #[property(setter = "pub(crate)", storage(serde(rename = "lvl")))]
        pub level: u8,

        #[property(policy = "read_only")]
        pub name: String,

        #[data(accessor(must_use))]
        _type: u8
    }

    impl Player {
        pub fn new(name: &str) -> Self {
            Self {
                level: 1,
                name:  name.to_string(),
                _type: 7
            }
        }
    }
}

use counters::{Counter, FrozenCounter};
use generic::{GenericData, IntData};
use heroes::{FloatWrapper, Hero, NewHero, Stat};
use players::Player;

#[test]
fn converted_scalars_go_through_the_converter() {
    let stat = Stat::new(10.0, 2.5);
    assert_eq!(stat.hp(), FloatWrapper(10.0));
    assert_eq!(stat.atk(), FloatWrapper(2.5));
}

#[test]
fn immutable_type_exposes_getters_only() {
    assert_eq!(Stat::NAME, "Stat");
    assert_eq!(Stat::ACCESSORS, &["Hp", "Atk"]);
    assert!(Stat::WRITABLE.is_empty());
    assert!(!Stat::MUTABLE);
}

#[test]
fn collections_are_exposed_as_views() {
    let hero = Hero::new(vec![Stat::new(1.0, 2.0), Stat::new(3.0, 4.0)]);
    let view: ReadView<'_, Stat> = hero.multipliers();

    assert_eq!(view.len(), 2);
    assert_eq!(view[1].hp(), FloatWrapper(3.0));
    assert_eq!(view.iter().map(|stat| stat.atk().0).sum::<f32>(), 6.0);
    assert_eq!(Hero::ACCESSORS, &["Multipliers"]);
}

#[test]
fn derived_type_inherits_base_accessors_first() {
    let hero = NewHero::new(vec![Stat::new(5.0, 1.0)], vec![1, 2, 3]);

    assert_eq!(NewHero::ACCESSORS, &["Multipliers", "NewValues"]);
    assert_eq!(hero.multipliers().len(), 1);
    assert_eq!(hero.new_values(), [1, 2, 3]);
    assert!(!NewHero::MUTABLE);
}

#[test]
fn mutable_type_gets_setters() {
    let mut counter = Counter::new(42);
    counter.set_value(10);
    counter.bump();

    assert_eq!(*counter.value(), 11);
    assert_eq!(*counter.id(), 42);
    assert_eq!(counter.history(), [10]);
    assert_eq!(Counter::WRITABLE, &["Value"]);
    assert!(Counter::MUTABLE);
    assert!(Counter::is_writable("Value"));
    assert!(!Counter::is_writable("History"));
}

#[test]
fn immutable_derived_type_drops_inherited_setters() {
    let mut counter = Counter::new(1);
    counter.bump();
    let frozen = FrozenCounter::from_counter(counter);

    assert_eq!(FrozenCounter::ACCESSORS, &["Value", "Id", "History"]);
    assert!(FrozenCounter::WRITABLE.is_empty());
    assert_eq!(*frozen.value(), 1);
    assert_eq!(frozen.history().first(), Some(&0));
}

#[test]
fn generic_base_is_substituted() {
    let base = GenericData::new("text");
    let derived = IntData::new(7, 1);

    assert_eq!(*base.value(), "text");
    assert_eq!(*derived.value(), 7);
    assert_eq!(*derived.extra(), 1);
    assert_eq!(IntData::ACCESSORS, &["Value", "Extra"]);
}

#[test]
fn properties_use_declared_setter() {
    let mut player = Player::new("ayla");
    player.set_level(3);

    assert_eq!(*player.level(), 3);
    assert_eq!(player.name(), "ayla");
    assert_eq!(*player.r#type(), 7);
    assert_eq!(Player::ACCESSORS, &["Level", "Name", "Type"]);
    assert_eq!(Player::WRITABLE, &["Level", "Type"]);
}

#[test]
fn storage_decorations_reach_the_backing_field() {
    let player = Player::new("ayla");
    let json = serde_json::to_value(&player).unwrap();

    assert_eq!(json["lvl"], 1);
    assert_eq!(json["name"], "ayla");
    assert_eq!(json["_type"], 7);
}

#[test]
fn views_do_not_copy_storage() {
    let values = VecDeque::from([1, 2, 3]);
    let view = ReadView::new(&values);
    assert_eq!(view.to_vec(), vec![1, 2, 3]);
}
