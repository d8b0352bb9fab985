mod csv;
mod pdf;
mod txt;
mod web;
