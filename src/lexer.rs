use super::error::{Error, ErrorKind};
use super::token::{Token, TokenKind};
use combine::error::{ParseError, StreamError};
use combine::parser::char::{digit, spaces, string};
use combine::parser::EasyParser;
use combine::stream::position::{self, SourcePosition};
use combine::stream::{Stream, StreamErrorFor};
use combine::{attempt, choice, eof, many1, one_of, optional, position, satisfy, token, Parser};
use log::trace;

type Lexeme = (TokenKind, String);

fn fraction<Input>() -> impl Parser<Input, Output = String>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    (token('.'), many1(digit())).map(|(dot, digits): (char, String)| format!("{}{}", dot, digits))
}

fn number<Input>() -> impl Parser<Input, Output = Lexeme>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    // `\d*\.?\d+`: a trailing dot without digits is left for the next token
    choice((
        (many1(digit()), optional(attempt(fraction())))
            .map(|(int, frac): (String, Option<String>)| int + frac.as_deref().unwrap_or("")),
        attempt(fraction()),
    ))
    .and_then(|ns: String| {
        ns.parse::<f64>()
            .map(|n| (TokenKind::Number(n), ns.clone()))
            .map_err(StreamErrorFor::<Input>::other)
    })
}

fn punct<Input>() -> impl Parser<Input, Output = Lexeme>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    one_of("+-*/()=;,".chars()).map(|c: char| (TokenKind::Kwd(c), c.to_string()))
}

/// `let` and `func` are tried ahead of identifiers and need no word
/// boundary: `letter` is `let` followed by `ter`.
fn keyword<Input>() -> impl Parser<Input, Output = Lexeme>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    choice((
        attempt(string("let")).map(|s: &str| (TokenKind::Let, s.to_owned())),
        attempt(string("func")).map(|s: &str| (TokenKind::Func, s.to_owned())),
    ))
}

fn ident<Input>() -> impl Parser<Input, Output = Lexeme>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    many1(satisfy(|c: char| c.is_ascii_alphabetic()))
        .map(|s: String| (TokenKind::Ident(s.clone()), s))
}

/// Skips whitespace and reads the next lexeme, or `None` at end of input.
/// The position is the one the lexeme starts at.
fn lex<Input>() -> impl Parser<Input, Output = (Input::Position, Option<Lexeme>)>
where
    Input: Stream<Token = char>,
    Input::Error: ParseError<Input::Token, Input::Range, Input::Position>,
{
    spaces().with((
        position(),
        choice((
            number().map(Some),
            punct().map(Some),
            keyword().map(Some),
            ident().map(Some),
            eof().map(|_| None),
        )),
    ))
}

fn line_of(pos: SourcePosition) -> usize {
    pos.line as usize
}

/// Splits `source` into tokens. The result always ends with an `Eof` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut input = position::Stream::new(source);
    let mut tokens = Vec::new();
    loop {
        let rest = input.input;
        match lex().easy_parse(input) {
            Ok(((pos, Some((kind, lexeme))), next)) => {
                tokens.push(Token::new(kind, lexeme, line_of(pos)));
                input = next;
            }
            Ok(((pos, None), _)) => {
                tokens.push(Token::eof(line_of(pos)));
                trace!("lexed {} tokens", tokens.len());
                return Ok(tokens);
            }
            Err(e) => {
                // every alternative fails before consuming, so the culprit
                // is the first character after the skipped whitespace
                let character = rest.trim_start().chars().next().unwrap_or_default();
                return Err(Error::from(ErrorKind::Lex {
                    character,
                    line: line_of(e.position),
                }));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::token::TokenKind::*;
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        tokenize(s).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_number() {
        assert_eq!(
            number().easy_parse("1.0").map(|x| x.0),
            Ok((Number(1.0), "1.0".to_owned()))
        );
        assert_eq!(
            number().easy_parse(".5").map(|x| x.0),
            Ok((Number(0.5), ".5".to_owned()))
        );
        assert_eq!(
            number().easy_parse("42").map(|x| x.0),
            Ok((Number(42.0), "42".to_owned()))
        );
    }

    #[test]
    fn test_number_trailing_dot() {
        assert_eq!(
            number().easy_parse("3.x").map(|x| x.1),
            Ok(".x")
        );
        assert_eq!(kinds("1.2.3"), vec![Number(1.2), Number(0.3), Eof]);
    }

    #[test]
    fn test_ident() {
        assert_eq!(
            ident().easy_parse("test").map(|x| x.0),
            Ok((Ident("test".to_owned()), "test".to_owned()))
        );
    }

    #[test]
    fn test_keyword() {
        assert_eq!(keyword().easy_parse("let").map(|x| x.0 .0), Ok(Let));
        assert_eq!(keyword().easy_parse("func").map(|x| x.0 .0), Ok(Func));
        assert!(keyword().easy_parse("lex").is_err());
    }

    #[test]
    fn test_keyword_prefix_splits_word() {
        assert_eq!(kinds("letter"), vec![Let, Ident("ter".to_owned()), Eof]);
        assert_eq!(kinds("funcy"), vec![Func, Ident("y".to_owned()), Eof]);
        assert_eq!(kinds("fun"), vec![Ident("fun".to_owned()), Eof]);
        assert_eq!(kinds("alet"), vec![Ident("alet".to_owned()), Eof]);
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            kinds("let x = 2 * (y + 1);"),
            vec![
                Let,
                Ident("x".to_owned()),
                Kwd('='),
                Number(2.0),
                Kwd('*'),
                Kwd('('),
                Ident("y".to_owned()),
                Kwd('+'),
                Number(1.0),
                Kwd(')'),
                Kwd(';'),
                Eof
            ]
        );
        assert_eq!(
            kinds("func f(a, b) = a / b - 1;")[..6],
            [
                Func,
                Ident("f".to_owned()),
                Kwd('('),
                Ident("a".to_owned()),
                Kwd(','),
                Ident("b".to_owned())
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(tokenize(""), Ok(vec![Token::eof(1)]));
        assert_eq!(tokenize("  \n\n "), Ok(vec![Token::eof(3)]));
    }

    #[test]
    fn test_lines() {
        let tokens = tokenize("let a = 1;\n\nlet b =\n  2;").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 1, 1, 3, 3, 3, 4, 4, 4]);
        assert_eq!(tokens[8], Token::new(Number(2.0), "2", 4));
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            tokenize("1 +\n  2 $ 3;").map_err(|e| e.kind().clone()),
            Err(ErrorKind::Lex {
                character: '$',
                line: 2
            })
        );
        assert_eq!(
            tokenize("x_y;").map_err(|e| e.kind().clone()),
            Err(ErrorKind::Lex {
                character: '_',
                line: 1
            })
        );
        assert_eq!(
            tokenize("3.;").map_err(|e| e.kind().clone()),
            Err(ErrorKind::Lex {
                character: '.',
                line: 1
            })
        );
    }

    #[test]
    fn test_relex_is_identical() {
        let src = "func sq(x) = x * x;\nlet n = sq(3.5);\nn - .25;";
        assert_eq!(tokenize(src), tokenize(src));
    }
}
