use sqlweave::prelude::*;

table! {
    pub struct Account("account") {
        id: Int [primary_key],
    }
}

fn main() {
    let _ = Account::default().cross_join(Account::default());
}
