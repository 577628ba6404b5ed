use sqlweave::prelude::*;

table! {
    pub struct Customer("customer") {
        id: Int [primary_key, default],
        name: Text,
    }
}

table! {
    pub struct Purchase("purchase") {
        id: Int [primary_key, default],
        customer_id: Int,
        total: Double,
    }
}

name_tag!(struct Biggest = "biggest";);

fn main() {
    let (customer, purchase) = (Customer::default(), Purchase::default());
    let biggest = select(max(purchase.total).as_(Biggest))
        .from(purchase)
        .where_(purchase.customer_id.eq(customer.id));
    let query = select((customer.name, scalar(biggest).as_(Biggest)))
        .from(customer)
        .where_(exists(
            select(purchase.id)
                .from(purchase)
                .where_(purchase.customer_id.eq(customer.id)),
        ))
        .build();

    let _: Option<(String, Option<f64>)> = query
        .decode(&vec![Value::from("x"), Value::Real(1.0)])
        .ok();
}
