pub mod venus;
