// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use data_derive::{Data, data_schema};

#[data_schema]
mod tables {
    #[data]
    pub struct Keyed<K, V> {
        _key: K,
        _rows: Vec<V>
    }

    #[data(base = "Keyed<u32, String>")]
    pub struct Names {
        _locale: String
    }

    impl Names {
        pub fn new() -> Self {
            Self {
                _key:    1,
                _rows:   vec!["a".to_string(), "b".to_string()],
                _locale: "en".to_string()
            }
        }
    }
}

fn main() {
    let names = tables::Names::new();
    assert_eq!(*names.key(), 1_u32);
    assert_eq!(names.rows().to_vec(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(names.locale(), "en");
    assert_eq!(<tables::Names as Data>::ACCESSORS, &["Key", "Rows", "Locale"]);
}
