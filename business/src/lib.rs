pub mod application {
    pub mod product {
        pub mod change_image;
        pub mod create;
        pub mod delete;
        pub mod get_all;
        pub mod get_by_id;
        pub mod read;
        pub mod update;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod product {
        pub mod errors;
        pub mod image_change;
        pub mod model;
        pub mod repository;
        pub mod storage;
        pub mod upload;
        pub mod use_cases {
            pub mod change_image;
            pub mod create;
            pub mod delete;
            pub mod get_all;
            pub mod get_by_id;
            pub mod read;
            pub mod update;
        }
    }
}
