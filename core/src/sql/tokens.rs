use sqlweave_types::Dialect;

/// SQL keywords, operators and punctuation.
///
/// Multi-word keywords are single tokens so that clause builders never have
/// to care about spacing inside them.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    // Statements and clauses
    SELECT,
    DISTINCT,
    FROM,
    WHERE,
    GROUP_BY,
    HAVING,
    ORDER_BY,
    LIMIT,
    OFFSET,
    WITH,
    RECURSIVE,
    UNION_ALL,
    UNION_DISTINCT,
    INSERT_INTO,
    INSERT_OR_IGNORE_INTO,
    INSERT_OR_REPLACE_INTO,
    VALUES,
    DEFAULT,
    DEFAULT_VALUES,
    UPDATE,
    SET,
    DELETE_FROM,
    USING,
    RETURNING,
    ON_CONFLICT,
    DO_NOTHING,
    DO_UPDATE_SET,

    // Joins
    JOIN,
    INNER_JOIN,
    LEFT_JOIN,
    LEFT_OUTER_JOIN,
    RIGHT_JOIN,
    RIGHT_OUTER_JOIN,
    FULL_JOIN,
    FULL_OUTER_JOIN,
    CROSS_JOIN,
    ON,

    // Expressions
    AS,
    AND,
    OR,
    NOT,
    IS,
    IS_DISTINCT_FROM,
    IS_NOT_DISTINCT_FROM,
    NULL,
    TRUE,
    FALSE,
    IN,
    BETWEEN,
    LIKE,
    EXISTS,
    CASE,
    WHEN,
    THEN,
    ELSE,
    END,
    ASC,
    DESC,
    NULLS_FIRST,
    NULLS_LAST,

    // Punctuation
    STAR,
    COMMA,
    LPAREN,
    RPAREN,
    DOT,

    // Operators
    EQ,
    NE,
    LT,
    LE,
    GT,
    GE,
    PLUS,
    MINUS,
    MUL,
    DIV,
    MOD,
    BIT_AND,
    BIT_OR,
    BIT_XOR,
    BIT_NOT,
    SHL,
    SHR,
}

impl Token {
    /// Dialect-neutral spelling of the token.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Token::SELECT => "SELECT",
            Token::DISTINCT => "DISTINCT",
            Token::FROM => "FROM",
            Token::WHERE => "WHERE",
            Token::GROUP_BY => "GROUP BY",
            Token::HAVING => "HAVING",
            Token::ORDER_BY => "ORDER BY",
            Token::LIMIT => "LIMIT",
            Token::OFFSET => "OFFSET",
            Token::WITH => "WITH",
            Token::RECURSIVE => "RECURSIVE",
            Token::UNION_ALL => "UNION ALL",
            Token::UNION_DISTINCT => "UNION DISTINCT",
            Token::INSERT_INTO => "INSERT INTO",
            Token::INSERT_OR_IGNORE_INTO => "INSERT OR IGNORE INTO",
            Token::INSERT_OR_REPLACE_INTO => "INSERT OR REPLACE INTO",
            Token::VALUES => "VALUES",
            Token::DEFAULT => "DEFAULT",
            Token::DEFAULT_VALUES => "DEFAULT VALUES",
            Token::UPDATE => "UPDATE",
            Token::SET => "SET",
            Token::DELETE_FROM => "DELETE FROM",
            Token::USING => "USING",
            Token::RETURNING => "RETURNING",
            Token::ON_CONFLICT => "ON CONFLICT",
            Token::DO_NOTHING => "DO NOTHING",
            Token::DO_UPDATE_SET => "DO UPDATE SET",
            Token::JOIN => "JOIN",
            Token::INNER_JOIN => "INNER JOIN",
            Token::LEFT_JOIN => "LEFT JOIN",
            Token::LEFT_OUTER_JOIN => "LEFT OUTER JOIN",
            Token::RIGHT_JOIN => "RIGHT JOIN",
            Token::RIGHT_OUTER_JOIN => "RIGHT OUTER JOIN",
            Token::FULL_JOIN => "FULL JOIN",
            Token::FULL_OUTER_JOIN => "FULL OUTER JOIN",
            Token::CROSS_JOIN => "CROSS JOIN",
            Token::ON => "ON",
            Token::AS => "AS",
            Token::AND => "AND",
            Token::OR => "OR",
            Token::NOT => "NOT",
            Token::IS => "IS",
            Token::IS_DISTINCT_FROM => "IS DISTINCT FROM",
            Token::IS_NOT_DISTINCT_FROM => "IS NOT DISTINCT FROM",
            Token::NULL => "NULL",
            Token::TRUE => "TRUE",
            Token::FALSE => "FALSE",
            Token::IN => "IN",
            Token::BETWEEN => "BETWEEN",
            Token::LIKE => "LIKE",
            Token::EXISTS => "EXISTS",
            Token::CASE => "CASE",
            Token::WHEN => "WHEN",
            Token::THEN => "THEN",
            Token::ELSE => "ELSE",
            Token::END => "END",
            Token::ASC => "ASC",
            Token::DESC => "DESC",
            Token::NULLS_FIRST => "NULLS FIRST",
            Token::NULLS_LAST => "NULLS LAST",
            Token::STAR => "*",
            Token::COMMA => ",",
            Token::LPAREN => "(",
            Token::RPAREN => ")",
            Token::DOT => ".",
            Token::EQ => "=",
            Token::NE => "<>",
            Token::LT => "<",
            Token::LE => "<=",
            Token::GT => ">",
            Token::GE => ">=",
            Token::PLUS => "+",
            Token::MINUS => "-",
            Token::MUL => "*",
            Token::DIV => "/",
            Token::MOD => "%",
            Token::BIT_AND => "&",
            Token::BIT_OR => "|",
            Token::BIT_XOR => "^",
            Token::BIT_NOT => "~",
            Token::SHL => "<<",
            Token::SHR => ">>",
        }
    }

    /// Spelling for a specific dialect, or `None` when the dialect has no
    /// equivalent.
    pub const fn for_dialect(&self, dialect: Dialect) -> Option<&'static str> {
        match (self, dialect) {
            (Token::UNION_DISTINCT, Dialect::SQLite) => Some("UNION"),
            (Token::INSERT_OR_IGNORE_INTO, Dialect::MySQL) => Some("INSERT IGNORE INTO"),
            (Token::INSERT_OR_REPLACE_INTO, Dialect::MySQL) => Some("REPLACE INTO"),
            (Token::INSERT_OR_IGNORE_INTO | Token::INSERT_OR_REPLACE_INTO, Dialect::PostgreSQL) => {
                None
            }
            (Token::RETURNING | Token::ON_CONFLICT, Dialect::MySQL) => None,
            (Token::USING, Dialect::SQLite | Dialect::MySQL) => None,
            (Token::NULLS_FIRST | Token::NULLS_LAST, Dialect::MySQL) => None,
            (Token::IS_DISTINCT_FROM | Token::IS_NOT_DISTINCT_FROM, Dialect::MySQL) => None,
            (Token::BIT_XOR, Dialect::PostgreSQL) => Some("#"),
            (Token::BIT_XOR, Dialect::SQLite) => None,
            (Token::FULL_JOIN | Token::FULL_OUTER_JOIN, d) if !d.supports_full_outer_join() => None,
            _ => Some(self.as_str()),
        }
    }

    /// Binary operators get a space on both sides.
    pub const fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::EQ
                | Token::NE
                | Token::LT
                | Token::LE
                | Token::GT
                | Token::GE
                | Token::PLUS
                | Token::MINUS
                | Token::MUL
                | Token::DIV
                | Token::MOD
                | Token::BIT_AND
                | Token::BIT_OR
                | Token::BIT_XOR
                | Token::BIT_NOT
                | Token::SHL
                | Token::SHR
        )
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
