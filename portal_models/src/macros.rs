macro_rules! id {
    ($ident:ident) => {
        #[::nutype::nutype(derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Deref,
            From,
            Serialize,
            Deserialize,
        ))]
        pub struct $ident(::uuid::Uuid);
    };
}

macro_rules! nutype_string {
    ($ident:ident($($validate:tt)*)) => {
        #[::nutype::nutype(
            sanitize(trim),
            $($validate)*,
            derive(
                Debug,
                Clone,
                PartialEq,
                Eq,
                Deref,
                TryFrom,
                AsRef,
                Serialize,
                Deserialize,
            ),
        )]
        pub struct $ident(String);
    };
}

pub(crate) use {id, nutype_string};
