#[cfg(test)]
pub mod test {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use crate::store::MapStore;

    /// Host settings bound to overridden and derived keys.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Host {
        pub id: String,
        pub hostname: String,
        pub online: bool,
        pub port: u32,
        pub score: i32,
        pub free_space: i64,
        pub ping_interval: Duration,
        pub ping_average: f64,
    }

    crate::record!(Host {
        #[bind(skip)]
        id,
        #[bind(name = "HOST")]
        hostname,
        online,
        port,
        score,
        #[bind(name = "SPACE")]
        free_space,
        #[bind(name = "PING")]
        ping_interval,
        ping_average,
    });

    /// Number of bound (non-ignored, bindable) fields in [`Host`].
    pub const HOST_BINDINGS: usize = 7;

    pub fn populated_host() -> Host {
        Host {
            id: "uid34".into(),
            hostname: "test.example.com".into(),
            online: true,
            port: 3000,
            score: 10000,
            free_space: 9_876_543_210,
            ping_interval: Duration::from_secs(10),
            ping_average: 4.5,
        }
    }

    /// A store holding every [`Host`] key, as a user would have written it.
    pub fn host_store() -> MapStore {
        MapStore::from_pairs([
            ("ID", "not empty"),
            ("HOST", "test.example.com"),
            ("ONLINE", "true"),
            ("PORT", "3000"),
            ("SCORE", "10000"),
            ("SPACE", "9876543210"),
            ("PING", "10s"),
            ("PING_AVERAGE", "4.5"),
        ])
    }

    /// Composite fields mixed with bindable ones.
    #[derive(Debug, Default)]
    pub struct Mixed {
        pub name: String,
        pub tags: Vec<String>,
        pub nickname: Option<String>,
        pub labels: BTreeMap<String, String>,
        pub level: u8,
    }

    crate::record!(Mixed {
        name,
        tags,
        nickname,
        labels,
        level,
    });

    /// One field of every bindable kind, camel-cased where it matters.
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct AllKinds {
        pub flag: bool,
        pub tiny: i8,
        pub small: i16,
        pub medium: i32,
        pub large: i64,
        pub native: isize,
        pub byte: u8,
        pub word: u16,
        pub dword: u32,
        pub qword: u64,
        pub size: usize,
        pub ratio: f32,
        pub precise: f64,
        pub label: String,
        pub timeout: Duration,
    }

    crate::record!(AllKinds {
        flag,
        tiny,
        small,
        medium,
        large,
        native,
        byte,
        word,
        dword,
        qword,
        size,
        ratio,
        precise,
        label,
        timeout,
    });

    pub fn populated_all_kinds() -> AllKinds {
        AllKinds {
            flag: true,
            tiny: -8,
            small: -16,
            medium: -32,
            large: -64,
            native: 640,
            byte: 8,
            word: 16,
            dword: 32,
            qword: u64::MAX,
            size: 4096,
            ratio: 1.5,
            precise: 2.51,
            label: "word".into(),
            timeout: Duration::from_millis(1500),
        }
    }
}
