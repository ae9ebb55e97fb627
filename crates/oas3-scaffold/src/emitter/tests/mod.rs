mod locations;
mod writer;
