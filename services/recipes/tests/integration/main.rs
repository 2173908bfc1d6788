mod follow_test;
mod helpers;
mod membership_test;
mod router_test;
