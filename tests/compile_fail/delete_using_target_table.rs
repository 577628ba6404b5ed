use sqlweave::prelude::*;

table! {
    pub struct Session("session") {
        id: Int [primary_key],
    }
}

fn main() {
    let _ = delete_from(Session::default()).using(Session::default());
}
