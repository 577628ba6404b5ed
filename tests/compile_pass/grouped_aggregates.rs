use sqlweave::prelude::*;

table! {
    pub struct Sale("sale") {
        id: Int [primary_key, default],
        region: Text,
        amount: BigInt,
    }
}

name_tag!(struct Revenue = "revenue"; struct Orders = "orders";);

fn main() {
    let sale = Sale::default();
    let query = select((
        sale.region,
        sum(sale.amount).as_(Revenue),
        count_all().as_(Orders),
    ))
    .from(sale)
    .unconditionally()
    .group_by(sale.region)
    .having(count_all().gt(10))
    .order_by(sum(sale.amount).desc())
    .build();

    let _: (String, Option<i64>, i64) = query
        .decode(&vec![Value::from("north"), Value::Null, Value::Integer(11)])
        .unwrap();
}
