pub mod naive;
pub mod treap;
