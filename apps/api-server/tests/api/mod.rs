mod harness;
mod health;
mod lifecycle;
