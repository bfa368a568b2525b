#![feature(test)]

extern crate test;

use alea::Dice;
use test::Bencher;

#[bench]
fn parse_basic(b: &mut Bencher) {
	b.iter(|| alea::parse("d20").unwrap());
}

#[bench]
fn parse_full(b: &mut Bencher) {
	b.iter(|| alea::parse("100d1000kh50-25").unwrap());
}

#[bench]
fn parse_invalid(b: &mut Bencher) {
	b.iter(|| alea::parse("2d20 kh1").unwrap_err());
}

#[bench]
fn parse_out_of_bounds(b: &mut Bencher) {
	b.iter(|| alea::parse("2d20kh3").unwrap_err());
}

#[bench]
fn fromstr_full(b: &mut Bencher) {
	b.iter(|| "100d1000kh50-25".parse::<Dice>().unwrap());
}
