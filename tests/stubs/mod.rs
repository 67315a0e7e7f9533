pub mod netatmo;
