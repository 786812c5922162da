// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use data_derive::{Data, data_schema};

#[data_schema]
mod settings {
    use std::collections::BTreeSet;

    #[data(mutable)]
    #[derive(Default)]
    pub struct Settings {
        #[property(setter)]
        pub volume: u8,

        #[property(setter = "")]
        pub revision: u32,

        #[data(policy = "read_only")]
        _profile: String,

        _tags: BTreeSet<String>,

        #[data(skip)]
        pub dirty: bool
    }

    impl Settings {
        pub fn touch(&mut self) {
            let next = self.revision + 1;
            self.set_revision(next);
            self.dirty = true;
        }
    }
}

fn main() {
    let mut settings = settings::Settings::default();
    settings.set_volume(7);
    settings.touch();

    assert_eq!(*settings.volume(), 7);
    assert_eq!(*settings.revision(), 1);
    assert!(settings.profile().is_empty());
    assert!(settings.tags().is_empty());
    assert!(settings.dirty);
    assert_eq!(
        <settings::Settings as Data>::WRITABLE,
        &["Volume", "Revision"]
    );
}
