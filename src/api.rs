pub mod rem;
